//! Foundation types for the filesystem simulator.
//!
//! This crate holds the shared data model that both the journal and the
//! namespace depend on. It has no I/O and no knowledge of the path index.
//!
//! # Key Types
//!
//! - [`File`] — A named, content-free file owned by one directory
//! - [`Directory`] — A node of the directory arena: path label, parent link,
//!   owned files and child ids
//! - [`DirId`] — Stable arena identifier for a directory
//! - [`Listing`] — Structured result of listing a directory
//! - [`Operation`] — The fixed set of journaled mutation tags
//!
//! Path rules (absolute-path validation and parent-path derivation) live in
//! [`path`].

pub mod directory;
pub mod error;
pub mod file;
pub mod listing;
pub mod operation;
pub mod path;

pub use directory::{DirId, Directory};
pub use error::TypeError;
pub use file::File;
pub use listing::Listing;
pub use operation::Operation;
pub use path::{
    basename, join, parent_path, rebase, validate_absolute, validate_file_name, ROOT,
};
