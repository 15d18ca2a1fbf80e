//! 出题服务 - 业务能力层
//!
//! 只负责把"一张已打乱的表"变成题目列表，不关心表从哪来、题发到哪去
//!
//! ## 两种题型
//!
//! - 前 `questions_per_mode` 行：给出作者，选他写的书 / 说的话
//! - 接下来的 `questions_per_mode` 行：给出书名 / 语录，选作者
//!
//! ## 正确答案下标
//!
//! 正确答案和干扰项在抽出后立刻格式化，打乱之后再在格式化后的选项里
//! 查找正确答案的位置。截断过的长答案因此也能找到。

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::QuizSettings;
use crate::models::question::QuestionItem;
use crate::models::record::QuizRecord;
use crate::models::table::distinct_authors;
use crate::services::distractor_sampler::DistractorSampler;
use crate::services::option_formatter::OptionFormatter;

/// 每道题至少两个选项
const MIN_OPTIONS: usize = 2;

/// 出题服务
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    formatter: OptionFormatter,
    sampler: DistractorSampler,
    questions_per_mode: usize,
    min_distinct_authors: usize,
}

impl QuestionGenerator {
    pub fn new(settings: &QuizSettings) -> Self {
        Self {
            formatter: OptionFormatter::new(settings.max_option_len),
            sampler: DistractorSampler::new(settings.distractors),
            questions_per_mode: settings.questions_per_mode,
            min_distinct_authors: settings.min_distinct_authors,
        }
    }

    pub fn formatter(&self) -> &OptionFormatter {
        &self.formatter
    }

    /// 为一张已打乱的表出题
    ///
    /// 作者数量不足时返回空列表
    pub fn generate<R, G>(&self, records: &[R], rng: &mut G) -> Vec<QuestionItem>
    where
        R: QuizRecord,
        G: Rng + ?Sized,
    {
        let authors = distinct_authors(records);
        if authors < self.min_distinct_authors {
            debug!(
                "作者只有 {} 个（至少需要 {} 个），不出题",
                authors, self.min_distinct_authors
            );
            return Vec::new();
        }

        let n = self.questions_per_mode;
        let forward = &records[..n.min(records.len())];
        let inverse = &records[forward.len()..(2 * n).min(records.len())];

        let mut questions = Vec::with_capacity(forward.len() + inverse.len());
        for row in forward {
            questions.extend(self.ask_for_subject(row, records, rng));
        }
        for row in inverse {
            questions.extend(self.ask_for_author(row, records, rng));
        }
        questions
    }

    /// 正向题：给出作者，在书名/语录中选
    fn ask_for_subject<R, G>(&self, row: &R, records: &[R], rng: &mut G) -> Option<QuestionItem>
    where
        R: QuizRecord,
        G: Rng + ?Sized,
    {
        let correct = row.subject();
        let pool = distinct_values(
            records
                .iter()
                .filter(|r| r.author() != row.author())
                .map(|r| r.subject()),
            correct,
        );
        let prompt = R::KIND.ask_for_subject(&self.formatter.format(row.author()));
        self.build_item(prompt, correct, &pool, rng)
    }

    /// 反向题：给出书名/语录，在作者中选
    fn ask_for_author<R, G>(&self, row: &R, records: &[R], rng: &mut G) -> Option<QuestionItem>
    where
        R: QuizRecord,
        G: Rng + ?Sized,
    {
        let correct = row.author();
        let pool = distinct_values(records.iter().map(|r| r.author()), correct);
        let prompt = R::KIND.ask_for_author(&self.formatter.format(row.subject()));
        self.build_item(prompt, correct, &pool, rng)
    }

    /// 抽干扰项、格式化、打乱、定位正确答案
    fn build_item<G>(
        &self,
        question: String,
        correct: &str,
        pool: &[&str],
        rng: &mut G,
    ) -> Option<QuestionItem>
    where
        G: Rng + ?Sized,
    {
        let correct = self.formatter.format(correct);

        let mut options = vec![correct.clone()];
        for distractor in self.sampler.sample(pool, rng) {
            let formatted = self.formatter.format(distractor);
            // 截断后撞车的干扰项直接丢掉，不重新抽
            if !options.contains(&formatted) {
                options.push(formatted);
            }
        }

        if options.len() < MIN_OPTIONS {
            warn!("⚠️ 没有可用的干扰项，跳过题目: {}", question);
            return None;
        }

        options.shuffle(rng);
        let answer_index = options
            .iter()
            .position(|o| *o == correct)
            .unwrap_or_default();

        Some(QuestionItem {
            question,
            options,
            answer_index,
        })
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(&QuizSettings::default())
    }
}

/// 按首次出现顺序去重，并去掉正确答案本身
fn distinct_values<'a>(values: impl Iterator<Item = &'a str>, correct: &str) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values
        .filter(|v| *v != correct && seen.insert(*v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{BookRecord, QuoteRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn books(n: usize) -> Vec<BookRecord> {
        (0..n)
            .map(|i| BookRecord::new(format!("Author {}", i), format!("Book {}", i)))
            .collect()
    }

    fn assert_item_invariants(item: &QuestionItem, max_len: usize) {
        assert!(item.answer_index < item.options.len());
        assert!(item.options.len() >= 2 && item.options.len() <= 4);
        let unique: HashSet<_> = item.options.iter().collect();
        assert_eq!(unique.len(), item.options.len(), "选项重复: {:?}", item.options);
        assert!(item.options.iter().all(|o| o.chars().count() <= max_len));
    }

    #[test]
    fn test_ten_authors_yield_ten_four_option_questions() {
        let generator = QuestionGenerator::default();
        let records = books(10);
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(1));

        assert_eq!(questions.len(), 10);
        for (item, row) in questions[..5].iter().zip(&records[..5]) {
            assert_eq!(item.question, format!("Which book was written by {}?", row.author));
            assert_eq!(item.options.len(), 4);
            assert_eq!(item.correct_option(), Some(row.book.as_str()));
            assert_item_invariants(item, 100);
        }
        for (item, row) in questions[5..].iter().zip(&records[5..]) {
            assert_eq!(item.question, format!("Who is the author of '{}'?", row.book));
            assert_eq!(item.options.len(), 4);
            assert_eq!(item.correct_option(), Some(row.author.as_str()));
            assert_item_invariants(item, 100);
        }
    }

    #[test]
    fn test_three_authors_yield_nothing() {
        let generator = QuestionGenerator::default();
        let records = vec![
            QuoteRecord::new("Seneca", "q1"),
            QuoteRecord::new("Seneca", "q2"),
            QuoteRecord::new("Epictetus", "q3"),
            QuoteRecord::new("Marcus", "q4"),
            QuoteRecord::new("Marcus", "q5"),
        ];
        assert!(generator
            .generate(&records, &mut StdRng::seed_from_u64(1))
            .is_empty());
    }

    #[test]
    fn test_small_table_uses_only_available_rows() {
        let generator = QuestionGenerator::default();
        let records = books(7);
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(5));

        // 前 5 行正向，剩下 2 行反向
        assert_eq!(questions.len(), 7);
        assert!(questions[..5].iter().all(|q| q.question.starts_with("Which book")));
        assert!(questions[5..].iter().all(|q| q.question.starts_with("Who is the author")));
    }

    #[test]
    fn test_distractors_never_share_author() {
        let generator = QuestionGenerator::default();
        let mut records = Vec::new();
        for a in 0..4 {
            for b in 0..3 {
                records.push(BookRecord::new(format!("A{}", a), format!("A{}-B{}", a, b)));
            }
        }
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(11));

        for (item, row) in questions[..5].iter().zip(&records) {
            let author_prefix = format!("{}-", row.author);
            for (i, option) in item.options.iter().enumerate() {
                if i != item.answer_index {
                    assert!(!option.starts_with(&author_prefix), "同作者干扰项: {}", option);
                }
            }
        }
        // 反向题只有 4 个作者，正好 4 个选项
        for item in &questions[5..] {
            assert_eq!(item.options.len(), 4);
        }
    }

    #[test]
    fn test_long_correct_answer_indexed_after_truncation() {
        let generator = QuestionGenerator::default();
        let long_quote = "x".repeat(150);
        let records = vec![
            QuoteRecord::new("Long", long_quote.clone()),
            QuoteRecord::new("B", "short b"),
            QuoteRecord::new("C", "short c"),
            QuoteRecord::new("D", "short d"),
        ];
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(3));

        let item = &questions[0];
        let expected = format!("{}...", "x".repeat(97));
        assert_eq!(item.options[item.answer_index], expected);
        assert_eq!(item.options[item.answer_index].chars().count(), 100);
        assert_item_invariants(item, 100);
    }

    #[test]
    fn test_long_subject_in_prompt_is_truncated() {
        let generator = QuestionGenerator::default();
        let long_quote = "y".repeat(150);
        let mut records: Vec<QuoteRecord> = (0..5)
            .map(|i| QuoteRecord::new(format!("A{}", i), format!("q{}", i)))
            .collect();
        records.push(QuoteRecord::new("Z", long_quote));

        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(4));
        let inverse = &questions[5];
        assert_eq!(
            inverse.question,
            format!("Who said:\n\"{}...\"?", "y".repeat(97))
        );
        assert_eq!(inverse.correct_option(), Some("Z"));
    }

    #[test]
    fn test_collisions_after_truncation_are_dropped() {
        let generator = QuestionGenerator::default();
        let prefix = "z".repeat(97);
        let records = vec![
            BookRecord::new("A", format!("{}-one-long-ending", prefix)),
            BookRecord::new("B", format!("{}-two-long-ending", prefix)),
            BookRecord::new("C", "Short C"),
            BookRecord::new("D", "Short D"),
        ];
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(8));

        let item = &questions[0];
        // B 的书名截断后和正确答案相同，被丢弃
        assert_eq!(item.options.len(), 3);
        assert_eq!(item.options[item.answer_index], format!("{}...", prefix));
        assert_item_invariants(item, 100);
    }

    #[test]
    fn test_duplicate_titles_across_authors_appear_once() {
        let generator = QuestionGenerator::default();
        let records = vec![
            BookRecord::new("A", "Poems"),
            BookRecord::new("B", "Poems"),
            BookRecord::new("C", "Poems"),
            BookRecord::new("D", "Letters"),
            BookRecord::new("E", "Essays"),
        ];
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(2));

        // 第一行 "Poems"：同名书被当作正确答案去掉，只剩 Letters / Essays
        let item = &questions[0];
        assert_eq!(item.options.len(), 3);
        assert_item_invariants(item, 100);
    }

    #[test]
    fn test_row_without_distractors_is_skipped() {
        let generator = QuestionGenerator::default();
        let records = vec![
            BookRecord::new("A", "Same"),
            BookRecord::new("B", "Same"),
            BookRecord::new("C", "Same"),
            BookRecord::new("D", "Same"),
        ];
        let questions = generator.generate(&records, &mut StdRng::seed_from_u64(2));

        // 正向题全部没有干扰项，反向题没有剩余行
        assert!(questions.is_empty());
    }

    #[test]
    fn test_same_seed_same_questions() {
        let generator = QuestionGenerator::default();
        let records = books(12);

        let a = generator.generate(&records, &mut StdRng::seed_from_u64(42));
        let b = generator.generate(&records, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_answer_position_varies() {
        let generator = QuestionGenerator::default();
        let records = books(10);
        let mut rng = StdRng::seed_from_u64(123);

        let positions: HashSet<usize> = (0..50)
            .flat_map(|_| generator.generate(&records, &mut rng))
            .map(|q| q.answer_index)
            .collect();
        assert_eq!(positions.len(), 4);
    }
}
