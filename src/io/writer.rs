use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::WriteMode;

fn write_error(path: &Path, e: std::io::Error) -> Error {
    match e.kind() {
        ErrorKind::PermissionDenied => Error::WriteDenied {
            path: path.to_path_buf(),
        },
        _ => Error::unexpected(path, e),
    }
}

/// Store `bytes` at `path` according to `mode`. Returns whether anything was written.
pub fn write_output(path: &Path, bytes: &[u8], mode: WriteMode) -> Result<bool> {
    match mode {
        WriteMode::Check => Ok(false),
        WriteMode::InPlace => {
            fs::write(path, bytes).map_err(|e| write_error(path, e))?;
            Ok(true)
        }
        WriteMode::Atomic => {
            write_atomic(path, bytes)?;
            Ok(true)
        }
    }
}

/// Write to a sibling temp file, carry over the permissions, then rename it
/// over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "polyglot".to_string());
    let permissions = fs::metadata(path)
        .map_err(|e| Error::unexpected(path, e))?
        .permissions();

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_error(path, e))?;
    debug!("Writing {} via {}", path.display(), tmp.path().display());

    tmp.write_all(bytes).map_err(|e| write_error(path, e))?;
    tmp.as_file().sync_all().map_err(|e| write_error(path, e))?;
    fs::set_permissions(tmp.path(), permissions).map_err(|e| write_error(path, e))?;
    tmp.persist(path).map_err(|e| write_error(path, e.error))?;
    Ok(())
}
