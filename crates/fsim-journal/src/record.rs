use std::fmt;

use fsim_types::Operation;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};

/// One journal line: an operation tag and its literal string arguments.
///
/// Records are written once and never changed. The line format is
/// `OPERATION param1 param2 ...` with single spaces and no escaping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub operation: Operation,
    pub params: Vec<String>,
}

impl JournalRecord {
    pub fn new<I, S>(operation: Operation, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operation,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that the record survives the line format.
    ///
    /// The parameter count must match the operation's arity. Empty
    /// parameters and parameters containing whitespace would make the line
    /// ambiguous, so they are rejected.
    pub fn validate(&self) -> Result<()> {
        let expected = self.operation.arity();
        if self.params.len() != expected {
            return Err(JournalError::InvalidRecord(format!(
                "{} takes {expected} parameters, got {}",
                self.operation,
                self.params.len()
            )));
        }
        for (i, param) in self.params.iter().enumerate() {
            if param.is_empty() {
                return Err(JournalError::InvalidRecord(format!(
                    "{}: parameter {i} is empty",
                    self.operation
                )));
            }
            if param.chars().any(char::is_whitespace) {
                return Err(JournalError::InvalidRecord(format!(
                    "{}: parameter {i} contains whitespace: {param:?}",
                    self.operation
                )));
            }
        }
        Ok(())
    }

    /// Render the record as a journal line, without the trailing newline.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for JournalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.as_str())?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        Ok(())
    }
}
