pub mod loaders;
pub mod question;
pub mod record;
pub mod table;

pub use loaders::{classify_all, RawWorksheet};
pub use question::{QuestionItem, QuestionSet};
pub use record::{BookRecord, QuizRecord, QuoteRecord};
pub use table::{ClassifiedTable, Table, TableKind};
