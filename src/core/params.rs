use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::WriteMode;

/// Heredoc delimiter used when none is given.
pub const DEFAULT_DELIMITER: &str = "END_WIN";

/// Attribute token that turns off git's text normalization for a pattern.
pub const DISABLE_NORMALIZATION_MARKER: &str = "-text";

/// Manifest file looked up under the project root.
pub const DEFAULT_MANIFEST: &str = ".gitattributes";

/// Rewrite parameters suitable for config files and host tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteParams {
    /// Line prefix that closes the CRLF region
    pub delimiter: String,
    pub mode: WriteMode,
}

impl RewriteParams {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// An empty delimiter would match the first line of every file.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "delimiter",
                value: self.delimiter.clone(),
            });
        }
        Ok(())
    }
}

impl Default for RewriteParams {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            mode: WriteMode::InPlace,
        }
    }
}

/// Where marked files are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectParams {
    /// Manifest path, relative to the project root
    pub manifest: PathBuf,
}

impl Default for SelectParams {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
        }
    }
}
