pub mod messenger;
pub mod sheets_client;
pub mod table_source;
pub mod telegram_client;

pub use messenger::{Messenger, SendOutcome};
pub use sheets_client::SheetsClient;
pub use table_source::TableSource;
pub use telegram_client::TelegramClient;
