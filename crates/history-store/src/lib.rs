//! history-store: durable command history and the email template store.

mod history;
pub use history::{HistoryEntry, JsonlHistory, MemoryHistory};

mod templates;
pub use templates::TemplateFile;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
