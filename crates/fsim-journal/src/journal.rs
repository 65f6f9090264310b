use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{JournalError, Result};
use crate::record::JournalRecord;
use crate::sink::JournalSink;

/// Flush/sync strategy for the journal file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// Flush the buffered writer after every record. Survives an abrupt
    /// process stop, not an OS crash.
    #[default]
    Flush,
    /// Flush and `fsync` after every record.
    EveryWrite,
}

/// Configuration for the file journal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Sync strategy applied after each record.
    pub sync_mode: SyncMode,
}

/// Text journal backed by a file opened in append mode.
///
/// Successive runs against the same path accumulate history. Each record is
/// one line, flushed before `append` returns. The file handle is released by
/// [`JournalSink::close`]; a journal dropped without being closed is flushed
/// on a best-effort basis.
#[derive(Debug)]
pub struct Journal {
    /// Path to the journal file.
    path: PathBuf,
    /// `None` once closed.
    writer: Option<BufWriter<File>>,
    config: JournalConfig,
    /// Records appended by this handle.
    records_written: u64,
}

impl Journal {
    /// Open (or create) the journal file at `path`.
    pub fn open(path: &Path, config: JournalConfig) -> Result<Self> {
        // Ensure parent directory exists.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let existing = file.metadata()?.len();

        info!(path = %path.display(), existing_bytes = existing, "journal opened");
        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            config,
            records_written: 0,
        })
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Number of records appended through this handle.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }
}

impl JournalSink for Journal {
    fn append(&mut self, record: &JournalRecord) -> Result<()> {
        let w = self.writer.as_mut().ok_or(JournalError::Closed)?;
        record.validate()?;

        writeln!(w, "{record}")?;
        w.flush()?;
        if matches!(self.config.sync_mode, SyncMode::EveryWrite) {
            w.get_ref().sync_all()?;
        }

        self.records_written += 1;
        debug!(
            operation = %record.operation,
            params = record.params.len(),
            seq = self.records_written,
            "journal append"
        );
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut w = self.writer.take().ok_or(JournalError::Closed)?;
        w.flush()?;
        w.get_ref().sync_all()?;

        info!(
            path = %self.path.display(),
            records = self.records_written,
            "journal closed"
        );
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.writer.is_none()
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            if let Err(e) = w.flush() {
                warn!(path = %self.path.display(), error = %e, "journal flush on drop failed");
            }
        }
    }
}
