//! High-level library API: rewrite a single polyglot script, list the files a
//! project marks `-text`, and run the whole pre-commit batch. Prefer these
//! entrypoints over the low-level `core` and `io` modules.
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::core::params::{RewriteParams, SelectParams};
use crate::core::rewrite::{RewriteStats, rewrite_line_endings};
use crate::error::{Error, Result};
use crate::io::{check_access, write_output};
use crate::types::WriteMode;

/// Outcome of rewriting one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteReport {
    pub path: PathBuf,
    pub mode: WriteMode,
    pub stats: RewriteStats,
    pub bytes_before: usize,
    pub bytes_after: usize,
    /// Output differs from the input
    pub changed: bool,
    /// Output was stored (false in check mode)
    pub written: bool,
}

/// Rewrite `path` in place with the given delimiter.
pub fn rewrite_file(path: &Path, delimiter: &str) -> Result<RewriteReport> {
    rewrite_file_with_params(path, &RewriteParams::new(delimiter))
}

/// Rewrite `path` using `params`: CRLF through the delimiter line, LF after.
///
/// Fails with `NotFound`, `ReadDenied` or `WriteDenied` before any byte is read,
/// and with `Unexpected` for any other I/O fault.
pub fn rewrite_file_with_params(path: &Path, params: &RewriteParams) -> Result<RewriteReport> {
    params.validate()?;
    check_access(path)?;

    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => Error::ReadDenied {
            path: path.to_path_buf(),
        },
        _ => Error::unexpected(path, e),
    })?;

    let output = rewrite_line_endings(&data, &params.delimiter);
    if output.stats.delimiter_line.is_none() {
        warn!(
            "Delimiter '{}' not found at the start of any line in '{}'; all lines use CRLF",
            params.delimiter,
            path.display()
        );
    }

    let changed = output.bytes != data;
    let written = write_output(path, &output.bytes, params.mode)?;

    match params.mode {
        WriteMode::Check if changed => {
            warn!("Line endings need adjusting in '{}'", path.display())
        }
        WriteMode::Check => info!("Line endings already correct in '{}'", path.display()),
        _ => info!("Line endings adjusted successfully in '{}'", path.display()),
    }

    Ok(RewriteReport {
        path: path.to_path_buf(),
        mode: params.mode,
        stats: output.stats,
        bytes_before: data.len(),
        bytes_after: output.bytes.len(),
        changed,
        written,
    })
}

/// Root-relative paths of every file whose manifest entry disables text normalization
pub fn select_marked_files(root: &Path, params: &SelectParams) -> Result<BTreeSet<PathBuf>> {
    crate::core::select::select_marked_files(root, params)
}

/// A file the batch could not process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Batch processing report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub selected: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub errors: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Rewrite every marked file under `root`, one after another.
///
/// A failing file is logged and recorded in the report; the remaining files
/// are still processed. Only a manifest that cannot be read is returned as an error.
pub fn run_batch(
    root: &Path,
    select: &SelectParams,
    params: &RewriteParams,
) -> Result<BatchReport> {
    params.validate()?;

    let files = select_marked_files(root, select)?;
    let mut report = BatchReport {
        selected: files.len(),
        ..BatchReport::default()
    };

    if files.is_empty() {
        info!("No files with '-text' attribute found.");
        return Ok(report);
    }

    info!(
        "Adjusting {} file(s) under {:?} with delimiter '{}'",
        files.len(),
        root,
        params.delimiter
    );

    for rel in files {
        let path = root.join(&rel);
        match rewrite_file_with_params(&path, params) {
            Ok(r) if r.changed => report.changed += 1,
            Ok(_) => report.unchanged += 1,
            Err(e) => {
                error!("Error: {}", e);
                report.errors += 1;
                report.failures.push(FileFailure {
                    path: rel,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "Batch complete: changed={} unchanged={} errors={}",
        report.changed, report.unchanged, report.errors
    );
    Ok(report)
}
