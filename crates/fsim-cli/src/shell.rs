//! Shell command grammar.
//!
//! One command per line, tokens split on whitespace. Extra trailing tokens
//! are ignored. Blank lines and lines starting with `#` parse to `None`.

use thiserror::Error;

pub const HELP: &str = "\
Available commands:
  mkdir [path]                                        - Create a directory
  rmdir [path]                                        - Remove a directory and everything in it
  renameDir [oldPath] [newPath]                       - Rename a directory
  ls [path]                                           - List contents of a directory (defaults to /)
  createFile [dirPath] [fileName]                     - Create a file
  deleteFile [dirPath] [fileName]                     - Delete a file
  renameFile [dirPath] [oldName] [newName]            - Rename a file
  copyFile [sourceDirPath] [destDirPath] [fileName]   - Copy a file
  exit                                                - Close the journal and exit
  help                                                - Show this help message";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Mkdir { path: String },
    Rmdir { path: String },
    RenameDir { old: String, new: String },
    Ls { path: String },
    CreateFile { dir: String, name: String },
    DeleteFile { dir: String, name: String },
    RenameFile { dir: String, old: String, new: String },
    CopyFile { src: String, dst: String, name: String },
    Help,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0}")]
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let arg = |i: usize, usage: &'static str| {
            parts
                .get(i)
                .map(|s| s.to_string())
                .ok_or(ParseError::Usage(usage))
        };

        let command = match parts[0] {
            "mkdir" => ShellCommand::Mkdir {
                path: arg(1, "mkdir [path]")?,
            },
            "rmdir" => ShellCommand::Rmdir {
                path: arg(1, "rmdir [path]")?,
            },
            "renameDir" => {
                const USAGE: &str = "renameDir [oldPath] [newPath]";
                ShellCommand::RenameDir {
                    old: arg(1, USAGE)?,
                    new: arg(2, USAGE)?,
                }
            }
            "ls" => ShellCommand::Ls {
                path: parts.get(1).unwrap_or(&"/").to_string(),
            },
            "createFile" => {
                const USAGE: &str = "createFile [dirPath] [fileName]";
                ShellCommand::CreateFile {
                    dir: arg(1, USAGE)?,
                    name: arg(2, USAGE)?,
                }
            }
            "deleteFile" => {
                const USAGE: &str = "deleteFile [dirPath] [fileName]";
                ShellCommand::DeleteFile {
                    dir: arg(1, USAGE)?,
                    name: arg(2, USAGE)?,
                }
            }
            "renameFile" => {
                const USAGE: &str = "renameFile [dirPath] [oldName] [newName]";
                ShellCommand::RenameFile {
                    dir: arg(1, USAGE)?,
                    old: arg(2, USAGE)?,
                    new: arg(3, USAGE)?,
                }
            }
            "copyFile" => {
                const USAGE: &str = "copyFile [sourceDirPath] [destDirPath] [fileName]";
                ShellCommand::CopyFile {
                    src: arg(1, USAGE)?,
                    dst: arg(2, USAGE)?,
                    name: arg(3, USAGE)?,
                }
            }
            "help" => ShellCommand::Help,
            "exit" => ShellCommand::Exit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}
