//! Attribute manifest (`.gitattributes`) parsing.
//!
//! Each entry is `<pattern> <attr> [<attr> ...]`. Blank lines, `#` comments and
//! lines with fewer than two tokens are ignored.
use std::path::Path;

use tracing::debug;

use crate::core::params::DISABLE_NORMALIZATION_MARKER;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub pattern: String,
    pub attributes: Vec<String>,
}

impl ManifestEntry {
    pub fn is_negated(&self) -> bool {
        self.pattern.starts_with('!')
    }

    pub fn has_attribute(&self, token: &str) -> bool {
        self.attributes.iter().any(|a| a == token)
    }

    pub fn disables_normalization(&self) -> bool {
        self.has_attribute(DISABLE_NORMALIZATION_MARKER)
    }
}

/// Parse a single manifest line. `None` for blanks, comments and malformed lines.
pub fn parse_line(line: &str) -> Option<ManifestEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let pattern = tokens.next()?;
    let attributes: Vec<String> = tokens.map(str::to_string).collect();
    if attributes.is_empty() {
        return None;
    }

    Some(ManifestEntry {
        pattern: pattern.to_string(),
        attributes,
    })
}

pub fn parse_manifest(text: &str) -> Vec<ManifestEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Patterns whose entries carry the disable-normalization marker.
/// Negated patterns are never selected.
pub fn marked_patterns(entries: &[ManifestEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| e.disables_normalization())
        .filter(|e| {
            if e.is_negated() {
                debug!("Skipping negated pattern '{}'", e.pattern);
                false
            } else {
                true
            }
        })
        .map(|e| e.pattern.as_str())
        .collect()
}

/// Read and parse a manifest. `Ok(None)` when the file does not exist.
pub fn read_manifest(path: &Path) -> Result<Option<Vec<ManifestEntry>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(parse_manifest(&String::from_utf8_lossy(&bytes)))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::unexpected(path, e)),
    }
}
