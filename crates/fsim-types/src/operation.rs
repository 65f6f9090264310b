use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of journaled mutation tags.
///
/// Listing is a query and is never journaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    CreateDirectory,
    DeleteDirectory,
    RenameDirectory,
    CreateFile,
    DeleteFile,
    RenameFile,
    CopyFile,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CreateDirectory,
        Operation::DeleteDirectory,
        Operation::RenameDirectory,
        Operation::CreateFile,
        Operation::DeleteFile,
        Operation::RenameFile,
        Operation::CopyFile,
    ];

    /// The tag written to the journal.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateDirectory => "CREATE_DIRECTORY",
            Operation::DeleteDirectory => "DELETE_DIRECTORY",
            Operation::RenameDirectory => "RENAME_DIRECTORY",
            Operation::CreateFile => "CREATE_FILE",
            Operation::DeleteFile => "DELETE_FILE",
            Operation::RenameFile => "RENAME_FILE",
            Operation::CopyFile => "COPY_FILE",
        }
    }

    /// Number of parameters a record for this operation carries.
    pub const fn arity(&self) -> usize {
        match self {
            Operation::CreateDirectory | Operation::DeleteDirectory => 1,
            Operation::RenameDirectory | Operation::CreateFile | Operation::DeleteFile => 2,
            Operation::RenameFile | Operation::CopyFile => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_tag() {
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{op}\""));
        }
    }

    #[test]
    fn serde_uses_journal_tags() {
        let json = serde_json::to_string(&Operation::RenameFile).unwrap();
        assert_eq!(json, "\"RENAME_FILE\"");
    }

    #[test]
    fn arity() {
        assert_eq!(Operation::CreateDirectory.arity(), 1);
        assert_eq!(Operation::RenameDirectory.arity(), 2);
        assert_eq!(Operation::CopyFile.arity(), 3);
    }
}
