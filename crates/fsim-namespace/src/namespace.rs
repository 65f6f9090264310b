use std::path::Path;

use fsim_journal::{Journal, JournalConfig, JournalError, JournalRecord, JournalSink};
use fsim_types::{Directory, Listing, Operation};
use tracing::{debug, error, warn};

use crate::error::{NamespaceError, NamespaceResult};
use crate::tree::DirectoryTree;

/// The simulated filesystem namespace.
///
/// Each mutation journals the literal arguments it was given, then validates
/// and applies them. A journal failure never blocks the in-memory mutation:
/// it is logged and kept as a pending fault for the caller to collect with
/// [`Namespace::take_journal_fault`].
///
/// Not synchronized. A front-end serving several callers must wrap the
/// namespace in its own lock.
#[derive(Debug)]
pub struct Namespace<J: JournalSink = Journal> {
    tree: DirectoryTree,
    journal: J,
    journal_fault: Option<JournalError>,
}

impl Namespace<Journal> {
    /// Open a namespace that journals to the text file at `path`.
    pub fn open(path: &Path, config: JournalConfig) -> NamespaceResult<Self> {
        let journal = Journal::open(path, config)?;
        Ok(Self::with_journal(journal))
    }
}

impl<J: JournalSink> Namespace<J> {
    /// Create a namespace holding only the root, journaling to `journal`.
    pub fn with_journal(journal: J) -> Self {
        Self {
            tree: DirectoryTree::new(),
            journal,
            journal_fault: None,
        }
    }

    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Take the most recent journal fault, if any.
    pub fn take_journal_fault(&mut self) -> Option<JournalError> {
        self.journal_fault.take()
    }

    /// Flush and release the journal. Must be called exactly once.
    pub fn close(&mut self) -> NamespaceResult<()> {
        self.journal.close()?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn contains_dir(&self, path: &str) -> bool {
        self.tree.contains(path)
    }

    pub fn directory(&self, path: &str) -> Option<&Directory> {
        self.tree.get(path)
    }

    pub fn dir_count(&self) -> usize {
        self.tree.dir_count()
    }

    pub fn children_of(&self, path: &str) -> NamespaceResult<Vec<&str>> {
        self.tree.children_of(path)
    }

    /// List the directory at `path`. Queries are not journaled.
    pub fn list_directory(&self, path: &str) -> NamespaceResult<Listing> {
        self.tree
            .listing(path)
            .inspect_err(|e| warn!(path, error = %e, "list rejected"))
    }

    // ---------------------------------------------------------------
    // Directory mutations
    // ---------------------------------------------------------------

    pub fn create_directory(&mut self, path: &str) -> NamespaceResult<()> {
        self.record(Operation::CreateDirectory, &[path]);
        let id = self
            .tree
            .create_dir(path)
            .inspect_err(|e| rejected(Operation::CreateDirectory, e))?;
        debug!(path, %id, "directory created");
        Ok(())
    }

    /// Delete the directory at `path` and everything beneath it.
    pub fn delete_directory(&mut self, path: &str) -> NamespaceResult<()> {
        self.record(Operation::DeleteDirectory, &[path]);
        let removed = self
            .tree
            .remove_dir(path)
            .inspect_err(|e| rejected(Operation::DeleteDirectory, e))?;
        debug!(path, removed = removed.len(), "directory deleted");
        Ok(())
    }

    pub fn rename_directory(&mut self, old_path: &str, new_path: &str) -> NamespaceResult<()> {
        self.record(Operation::RenameDirectory, &[old_path, new_path]);
        let rekeyed = self
            .tree
            .rename_dir(old_path, new_path)
            .inspect_err(|e| rejected(Operation::RenameDirectory, e))?;
        debug!(old_path, new_path, rekeyed, "directory renamed");
        Ok(())
    }

    // ---------------------------------------------------------------
    // File mutations
    // ---------------------------------------------------------------

    pub fn create_file(&mut self, dir_path: &str, file_name: &str) -> NamespaceResult<()> {
        self.record(Operation::CreateFile, &[dir_path, file_name]);
        self.tree
            .create_file(dir_path, file_name)
            .inspect_err(|e| rejected(Operation::CreateFile, e))?;
        debug!(dir_path, file_name, "file created");
        Ok(())
    }

    /// Delete a file. A missing file is a silent no-op.
    pub fn delete_file(&mut self, dir_path: &str, file_name: &str) -> NamespaceResult<()> {
        self.record(Operation::DeleteFile, &[dir_path, file_name]);
        let existed = self
            .tree
            .delete_file(dir_path, file_name)
            .inspect_err(|e| rejected(Operation::DeleteFile, e))?;
        debug!(dir_path, file_name, existed, "file deleted");
        Ok(())
    }

    /// Rename a file. A missing `old_name` is a silent no-op.
    pub fn rename_file(
        &mut self,
        dir_path: &str,
        old_name: &str,
        new_name: &str,
    ) -> NamespaceResult<()> {
        self.record(Operation::RenameFile, &[dir_path, old_name, new_name]);
        let renamed = self
            .tree
            .rename_file(dir_path, old_name, new_name)
            .inspect_err(|e| rejected(Operation::RenameFile, e))?;
        debug!(dir_path, old_name, new_name, renamed, "file renamed");
        Ok(())
    }

    pub fn copy_file(
        &mut self,
        src_dir_path: &str,
        dst_dir_path: &str,
        file_name: &str,
    ) -> NamespaceResult<()> {
        self.record(Operation::CopyFile, &[src_dir_path, dst_dir_path, file_name]);
        self.tree
            .copy_file(src_dir_path, dst_dir_path, file_name)
            .inspect_err(|e| rejected(Operation::CopyFile, e))?;
        debug!(src_dir_path, dst_dir_path, file_name, "file copied");
        Ok(())
    }

    /// Journal an attempt. Failures become the pending fault.
    fn record(&mut self, operation: Operation, params: &[&str]) {
        let record = JournalRecord::new(operation, params.iter().copied());
        if let Err(e) = self.journal.append(&record) {
            error!(%operation, error = %e, "journal append failed");
            self.journal_fault = Some(e);
        }
    }
}

fn rejected(operation: Operation, err: &NamespaceError) {
    warn!(%operation, error = %err, "operation rejected");
}
