//! Error types for talking to the task store.

use thiserror::Error;

/// Failures surfaced by the sync client.
///
/// Transport and API errors are recoverable: the cycle that hit one is
/// abandoned and the next cycle starts over from a fresh sync. A missing
/// tracking label is a configuration problem and fatal at startup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sync request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sync endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{rejected} of {total} queued changes were rejected")]
    Rejected { rejected: usize, total: usize },

    #[error("label '{0}' does not exist; create it or pass a different --label")]
    LabelMissing(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
