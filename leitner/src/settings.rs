use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;

/// Tunables for hint composition and progress reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of the trailing window used for recent-performance stats.
    pub trailing_window_days: i64,
    /// Maximum number of cards reported as most challenging.
    pub challenging_card_limit: usize,
    pub math_tags: Vec<String>,
    pub knowledge_tags: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            trailing_window_days: 7,
            challenging_card_limit: 5,
            math_tags: vec!["math".to_string(), "arithmetic".to_string()],
            knowledge_tags: vec!["geography".to_string(), "history".to_string(), "literature".to_string()],
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let settings: Settings = serde_json::from_reader(reader)?;
            Ok(settings)
        } else {
            log::info!("No settings file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
