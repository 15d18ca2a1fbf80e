pub mod sheet_loader;

pub use sheet_loader::{classify, classify_all, RawWorksheet};
