//! Path-indexed directory namespace for the filesystem simulator.
//!
//! The [`Namespace`] owns a [`DirectoryTree`] (an arena of directories plus
//! the path index) and a [`JournalSink`]. Every mutating call is written to
//! the journal first and validated second, so the journal is an audit trail
//! of attempts, including the ones that were rejected.
//!
//! # Modules
//!
//! - [`error`] — [`NamespaceError`] and the [`NamespaceResult`] alias
//! - [`tree`] — [`DirectoryTree`], the arena/index pair and its invariants
//! - [`namespace`] — [`Namespace`], the journaled public API
//!
//! [`JournalSink`]: fsim_journal::JournalSink

pub mod error;
pub mod namespace;
pub mod tree;

pub use fsim_types::{Directory, Listing};

pub use error::{NamespaceError, NamespaceResult};
pub use namespace::Namespace;
pub use tree::DirectoryTree;
