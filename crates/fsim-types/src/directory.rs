use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::File;

/// Stable arena identifier for a directory.
///
/// Ids are never reused within one namespace, so a stale id can only miss,
/// never alias a different directory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DirId(u64);

impl DirId {
    /// The id of the root directory.
    pub const ROOT: DirId = DirId(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The id that follows this one in allocation order.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

impl fmt::Debug for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirId({})", self.0)
    }
}

impl fmt::Display for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dir#{}", self.0)
    }
}

/// A directory node.
///
/// A directory owns its files and knows its children by [`DirId`]. It knows
/// nothing about the global path index; keeping the index consistent with
/// the arena is the namespace's job.
///
/// File operations here do not enforce name uniqueness. Callers that need
/// unique names must check with [`Directory::file`] first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    path: String,
    parent: Option<DirId>,
    files: Vec<File>,
    subdirectories: Vec<DirId>,
}

impl Directory {
    /// Create the root directory (`/`, no parent).
    pub fn root() -> Self {
        Self::new(crate::path::ROOT, None)
    }

    /// Create an empty directory labelled `path` under `parent`.
    pub fn new(path: impl Into<String>, parent: Option<DirId>) -> Self {
        Self {
            path: path.into(),
            parent,
            files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    // ---------------------------------------------------------------
    // Files
    // ---------------------------------------------------------------

    /// Append a file. No uniqueness check at this layer.
    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    /// Remove the first file named `name`, returning it if one existed.
    pub fn remove_file(&mut self, name: &str) -> Option<File> {
        let pos = self.files.iter().position(|f| f.name() == name)?;
        Some(self.files.remove(pos))
    }

    /// Rename the first file named `old` to `new` in place.
    ///
    /// Returns `false` (and changes nothing) if no file is named `old`.
    pub fn rename_file(&mut self, old: &str, new: &str) -> bool {
        match self.files.iter_mut().find(|f| f.name() == old) {
            Some(file) => {
                file.set_name(new);
                true
            }
            None => false,
        }
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name() == name)
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    // ---------------------------------------------------------------
    // Subdirectories
    // ---------------------------------------------------------------

    pub fn add_subdirectory(&mut self, id: DirId) {
        self.subdirectories.push(id);
    }

    /// Detach a child. Returns `true` if it was attached.
    pub fn remove_subdirectory(&mut self, id: DirId) -> bool {
        match self.subdirectories.iter().position(|c| *c == id) {
            Some(pos) => {
                self.subdirectories.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn has_subdirectory(&self, id: DirId) -> bool {
        self.subdirectories.contains(&id)
    }

    /// Child ids in insertion order.
    pub fn subdirectories(&self) -> &[DirId] {
        &self.subdirectories
    }
}
