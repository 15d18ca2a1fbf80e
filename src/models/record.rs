use serde::{Deserialize, Serialize};

use crate::models::table::TableKind;

/// 可出题的一行记录
///
/// 作者是区分列（distractor 不能和正确答案同作者），
/// `subject` 是被考查的那一列（书名或语录）
pub trait QuizRecord: Clone {
    const KIND: TableKind;

    fn author(&self) -> &str;
    fn subject(&self) -> &str;
    fn from_fields(author: String, subject: String) -> Self;
}

/// 书目表的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub author: String,
    pub book: String,
}

impl BookRecord {
    pub fn new(author: impl Into<String>, book: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            book: book.into(),
        }
    }
}

impl QuizRecord for BookRecord {
    const KIND: TableKind = TableKind::Books;

    fn author(&self) -> &str {
        &self.author
    }

    fn subject(&self) -> &str {
        &self.book
    }

    fn from_fields(author: String, book: String) -> Self {
        Self { author, book }
    }
}

/// 语录表的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub author: String,
    pub quote: String,
}

impl QuoteRecord {
    pub fn new(author: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            quote: quote.into(),
        }
    }
}

impl QuizRecord for QuoteRecord {
    const KIND: TableKind = TableKind::Quotes;

    fn author(&self) -> &str {
        &self.author
    }

    fn subject(&self) -> &str {
        &self.quote
    }

    fn from_fields(author: String, quote: String) -> Self {
        Self { author, quote }
    }
}
