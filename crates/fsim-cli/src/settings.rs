use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fsim_journal::{JournalConfig, SyncMode};
use serde::{Deserialize, Serialize};

/// Front-end settings, loaded from TOML.
///
/// ```toml
/// journal_path = "journal.txt"
/// sync_mode = "every-write"
/// prompt = "fsim> "
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub journal_path: PathBuf,
    pub sync_mode: SyncMode,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            journal_path: PathBuf::from("journal.txt"),
            sync_mode: SyncMode::default(),
            prompt: "> ".into(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Settings from `config` (or defaults), with the journal flag applied on top.
    pub fn resolve(config: Option<&Path>, journal: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(journal) = journal {
            settings.journal_path = journal.to_path_buf();
        }
        Ok(settings)
    }

    pub fn journal_config(&self) -> JournalConfig {
        JournalConfig {
            sync_mode: self.sync_mode,
        }
    }
}
