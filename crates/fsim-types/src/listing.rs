use std::fmt;

use serde::{Deserialize, Serialize};

/// The contents of one directory at the time it was listed.
///
/// Subdirectories are given by full path and files by name, both in
/// insertion order. `Display` renders the human-readable form:
///
/// ```text
/// Contents of directory /a:
///  - /a/b
///  - x.txt
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub path: String,
    pub subdirectories: Vec<String>,
    pub files: Vec<String>,
}

impl Listing {
    /// Child entries relative to the listed directory: subdirectory base
    /// names followed by file names.
    pub fn entry_names(&self) -> Vec<&str> {
        self.subdirectories
            .iter()
            .map(|p| crate::path::basename(p))
            .chain(self.files.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contents of directory {}:", self.path)?;
        for dir in &self.subdirectories {
            write!(f, "\n - {dir}")?;
        }
        for file in &self.files {
            write!(f, "\n - {file}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Listing {
        Listing {
            path: "/a".into(),
            subdirectories: vec!["/a/b".into(), "/a/c".into()],
            files: vec!["x.txt".into()],
        }
    }

    #[test]
    fn display_lists_dirs_then_files() {
        let text = sample().to_string();
        assert_eq!(
            text,
            "Contents of directory /a:\n - /a/b\n - /a/c\n - x.txt"
        );
    }

    #[test]
    fn display_empty() {
        let listing = Listing {
            path: "/".into(),
            subdirectories: vec![],
            files: vec![],
        };
        assert!(listing.subdirectories.is_empty() && listing.files.is_empty());
        assert_eq!(listing.to_string(), "Contents of directory /:");
    }

    #[test]
    fn entry_names_are_relative() {
        assert_eq!(sample().entry_names(), vec!["b", "c", "x.txt"]);
    }
}
