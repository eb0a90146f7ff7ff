//! Construction-time store settings

use crate::{CellValue, Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DELIMITER: char = ';';
pub const DEFAULT_PLACEHOLDER: CellValue = 0;

/// Settings a [`crate::Store`] is built from. Fixed for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file
    pub path: PathBuf,
    /// Substituted for blank cells on read and for absent columns on write
    #[serde(default = "default_placeholder")]
    pub placeholder: CellValue,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Echo diagnostics to stderr
    #[serde(default)]
    pub debug_mode: bool,
}

fn default_placeholder() -> CellValue {
    DEFAULT_PLACEHOLDER
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl StoreConfig {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            placeholder: DEFAULT_PLACEHOLDER,
            delimiter: DEFAULT_DELIMITER,
            debug_mode: false,
        }
    }

    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject delimiters that collide with line breaks or the integer cell grammar
    pub fn validate(&self) -> Result<()> {
        let d = self.delimiter;
        if d == '\n' || d == '\r' {
            return Err(StoreError::invalid_config(
                "delimiter must not be a line break",
            ));
        }
        if d.is_ascii_digit() || d == '-' || d == '+' {
            return Err(StoreError::invalid_config(format!(
                "delimiter {:?} collides with integer cells",
                d
            )));
        }
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::invalid_config("path must not be empty"));
        }
        Ok(())
    }
}
