//! Append-only operation journal for the filesystem simulator.
//!
//! Every mutation attempted against the namespace is recorded here as one
//! line of text, in call order:
//!
//! ```text
//! CREATE_DIRECTORY /a
//! CREATE_FILE /a x.txt
//! COPY_FILE /a /b x.txt
//! ```
//!
//! The journal is write-only at runtime. There is no read or replay path.
//!
//! # Backends
//!
//! All backends implement [`JournalSink`]:
//!
//! - [`Journal`] — text file opened in append mode, flushed per record
//! - [`MemoryJournal`] — `Vec`-backed sink for tests and embedding

pub mod error;
pub mod journal;
pub mod memory;
pub mod record;
pub mod sink;

pub use error::{JournalError, Result};
pub use journal::{Journal, JournalConfig, SyncMode};
pub use memory::MemoryJournal;
pub use record::JournalRecord;
pub use sink::JournalSink;
