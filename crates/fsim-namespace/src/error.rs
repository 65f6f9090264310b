//! Error types for namespace operations.

use fsim_journal::JournalError;
use fsim_types::TypeError;
use thiserror::Error;

/// Errors that can occur during namespace operations.
///
/// Every error except [`NamespaceError::Journal`] means the operation was
/// skipped and the namespace is unchanged.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// The referenced directory is not in the path index.
    #[error("directory not found: {path}")]
    NotFound { path: String },

    /// The referenced file is not in the given directory.
    #[error("file not found: {name} in {dir}")]
    FileNotFound { dir: String, name: String },

    /// A directory or file already exists at this path.
    #[error("already exists: {path}")]
    AlreadyExists { path: String },

    /// The root directory cannot be deleted or renamed.
    #[error("the root directory cannot be deleted or renamed")]
    RootImmutable,

    /// A directory rename may only change the last path component.
    #[error("cannot rename {from} to {to}: new path must share the parent {parent}")]
    CrossParentRename {
        from: String,
        to: String,
        parent: String,
    },

    /// A path or file name failed validation.
    #[error(transparent)]
    Invalid(#[from] TypeError),

    /// The journal could not be opened or closed.
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
}

impl NamespaceError {
    pub(crate) fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    pub(crate) fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Returns `true` for the errors that mean something referenced was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::FileNotFound { .. })
    }
}

/// Convenience type alias for namespace operations.
pub type NamespaceResult<T> = std::result::Result<T, NamespaceError>;
