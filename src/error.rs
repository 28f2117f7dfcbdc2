/// Error type shared by the store, the composer and the UI surfaces
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Reading or writing chrome.storage failed.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// A record with the same URL is already stored.
    #[error("already tracked: {url}")]
    AlreadyTracked { url: String },
    /// A follow-up was requested but nothing is tracked.
    #[error("no jobs to follow up on")]
    NoRecords,
    #[error("failed to copy to clipboard: {0}")]
    ClipboardWriteFailed(String),
    /// The stored value is not a job list.
    #[error("failed to decode stored jobs: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
