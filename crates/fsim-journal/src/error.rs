use std::io;

/// Errors produced by journal sinks.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// I/O error while writing, flushing, or closing the journal file.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The sink was already closed.
    #[error("journal is closed")]
    Closed,

    /// The record cannot be written unambiguously as one line.
    #[error("invalid journal record: {0}")]
    InvalidRecord(String),
}

/// Convenience alias used throughout the journal crate.
pub type Result<T> = std::result::Result<T, JournalError>;
