use serde::{Deserialize, Serialize};

/// 一道单选测验题
///
/// `options` 和 `answer_index` 都是在格式化、打乱之后确定的，
/// 所以 `options[answer_index]` 就是格式化后的正确答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl QuestionItem {
    /// 正确选项文本
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

/// 一张表生成的全部题目，发送前先发 `header`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub table_name: String,
    pub header: String,
    pub items: Vec<QuestionItem>,
}

impl QuestionSet {
    pub fn new(table_name: impl Into<String>, items: Vec<QuestionItem>) -> Self {
        let table_name = table_name.into();
        Self {
            header: format!("📚 Quiz time: {}", table_name),
            table_name,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_option() {
        let item = QuestionItem {
            question: "Who is the author of 'Dune'?".to_string(),
            options: vec!["Asimov".into(), "Herbert".into(), "Clarke".into()],
            answer_index: 1,
        };
        assert_eq!(item.correct_option(), Some("Herbert"));
    }

    #[test]
    fn test_header_names_table() {
        let set = QuestionSet::new("Books", Vec::new());
        assert_eq!(set.header, "📚 Quiz time: Books");
        assert!(set.is_empty());
    }
}
