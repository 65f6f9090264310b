use thiserror::Error;

/// Errors produced by path and name validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid file name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}
