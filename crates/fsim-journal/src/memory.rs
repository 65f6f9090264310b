//! In-memory journal sink for tests and embedding.
//!
//! [`MemoryJournal`] keeps every accepted record in a `Vec`. It follows the
//! same close discipline as the file journal and can be told to fail appends,
//! which is how journal faults are exercised without touching a disk.

use std::io;

use crate::error::{JournalError, Result};
use crate::record::JournalRecord;
use crate::sink::JournalSink;

#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Vec<JournalRecord>,
    closed: bool,
    fail_appends: bool,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal whose every append fails with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail_appends: true,
            ..Self::default()
        }
    }

    pub fn set_fail_appends(&mut self, fail: bool) {
        self.fail_appends = fail;
    }

    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    /// Records rendered as journal lines.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(JournalRecord::to_line).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl JournalSink for MemoryJournal {
    fn append(&mut self, record: &JournalRecord) -> Result<()> {
        if self.closed {
            return Err(JournalError::Closed);
        }
        if self.fail_appends {
            return Err(JournalError::Io(io::Error::other("simulated journal failure")));
        }
        record.validate()?;
        self.records.push(record.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(JournalError::Closed);
        }
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
