//! 表格分类
//!
//! 一张工作表只可能是书目表、语录表或无法识别（跳过）

use crate::models::record::{BookRecord, QuoteRecord, QuizRecord};
use std::collections::HashSet;

/// 作者列名，所有可出题的表都必须有这一列
pub const AUTHOR_COLUMN: &str = "Author";

/// 表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// 书目表：Author + Book
    Books,
    /// 语录表：Author + Quote
    Quotes,
}

impl TableKind {
    /// 被考查的那一列
    pub fn column(self) -> &'static str {
        match self {
            TableKind::Books => "Book",
            TableKind::Quotes => "Quote",
        }
    }

    /// 日志里显示的名称
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Books => "书目",
            TableKind::Quotes => "语录",
        }
    }

    /// 根据表头判断表类型
    ///
    /// 必须有 `Author`；`Book` 优先于 `Quote`
    pub fn classify<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        let has = |name: &str| header.iter().any(|h| h.as_ref().trim() == name);

        if !has(AUTHOR_COLUMN) {
            return None;
        }
        [TableKind::Books, TableKind::Quotes]
            .into_iter()
            .find(|kind| has(kind.column()))
    }

    /// 给出作者，问他写了哪个（正向题）
    pub fn ask_for_subject(self, author: &str) -> String {
        match self {
            TableKind::Books => format!("Which book was written by {}?", author),
            TableKind::Quotes => format!("Which of these did {} say?", author),
        }
    }

    /// 给出书名/语录，问作者是谁（反向题）
    pub fn ask_for_author(self, subject: &str) -> String {
        match self {
            TableKind::Books => format!("Who is the author of '{}'?", subject),
            TableKind::Quotes => format!("Who said:\n\"{}\"?", subject),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一张已分类的表（工作表标题 + 有序记录）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<R> {
    pub name: String,
    pub records: Vec<R>,
}

impl<R: QuizRecord> Table<R> {
    pub fn new(name: impl Into<String>, records: Vec<R>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// 去重后的作者数量
    pub fn distinct_authors(&self) -> usize {
        distinct_authors(&self.records)
    }
}

/// 记录中去重后的作者数量
pub fn distinct_authors<R: QuizRecord>(records: &[R]) -> usize {
    records
        .iter()
        .map(|r| r.author())
        .collect::<HashSet<_>>()
        .len()
}

/// 分类后的表
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedTable {
    Books(Table<BookRecord>),
    Quotes(Table<QuoteRecord>),
}

impl ClassifiedTable {
    pub fn name(&self) -> &str {
        match self {
            ClassifiedTable::Books(t) => &t.name,
            ClassifiedTable::Quotes(t) => &t.name,
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            ClassifiedTable::Books(_) => TableKind::Books,
            ClassifiedTable::Quotes(_) => TableKind::Quotes,
        }
    }

    /// 记录条数
    pub fn len(&self) -> usize {
        match self {
            ClassifiedTable::Books(t) => t.records.len(),
            ClassifiedTable::Quotes(t) => t.records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
