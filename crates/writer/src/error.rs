//! Writer error types

use thiserror::Error;

use contracts::BusError;

/// Writer-specific errors
#[derive(Debug, Error)]
pub enum WriterError {
    /// Writer construction rejected the settings
    #[error("invalid writer settings: {0}")]
    Config(#[source] BusError),

    /// Gate acquisition cancelled before entry; no state was mutated
    #[error("cancelled while waiting for buffer access")]
    Cancelled,

    /// Operation invoked after disposal
    #[error("writer already disposed")]
    Disposed,

    /// Publish failed; the buffer retains the undelivered bytes and a later
    /// flush will include them in the next batch
    #[error("transport error: {0}")]
    Transport(#[source] BusError),
}

impl WriterError {
    /// Whether the failed operation left buffered bytes for a later flush
    pub fn retains_bytes(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
