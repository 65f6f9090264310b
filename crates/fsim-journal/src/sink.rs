//! The [`JournalSink`] trait defining the journal write interface.

use crate::error::Result;
use crate::record::JournalRecord;

/// Write-only, ordered destination for journal records.
///
/// A sink is acquired once, receives records in call order, and is closed
/// exactly once. Implementations must:
///
/// - make each appended record durable before `append` returns, as far as the
///   backend allows
/// - fail `append` and `close` with [`JournalError::Closed`] after `close`
///
/// [`JournalError::Closed`]: crate::JournalError::Closed
pub trait JournalSink {
    /// Append one record.
    fn append(&mut self, record: &JournalRecord) -> Result<()>;

    /// Flush and release the underlying resource.
    fn close(&mut self) -> Result<()>;

    /// Returns `true` once `close` has succeeded.
    fn is_closed(&self) -> bool;
}

impl<S: JournalSink + ?Sized> JournalSink for Box<S> {
    fn append(&mut self, record: &JournalRecord) -> Result<()> {
        (**self).append(record)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
