use super::domain::{ReceiptId, ScoreRecord};

/// Storage abstraction so the service can swap in-memory and persistent backends.
///
/// Implementations are shared across request handlers and must serialize writes. A record is
/// written once: `put` never overwrites an existing id.
pub trait ReceiptStore: Send + Sync {
    fn put(&self, record: ScoreRecord) -> Result<ScoreRecord, StoreError>;
    fn get(&self, id: &ReceiptId) -> Result<Option<ScoreRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("receipt id already used")]
    Conflict,
    #[error("receipt not found")]
    NotFound,
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}
