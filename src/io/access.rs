//! Pre-flight checks run before a file is read: it must exist, be readable
//! and be writable. Each failure maps onto its own error variant.
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

pub fn check_access(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(Error::unexpected(path, e)),
    };

    if metadata.is_dir() {
        return Err(Error::unexpected(
            path,
            std::io::Error::other("is a directory, not a file"),
        ));
    }

    if let Err(e) = File::open(path) {
        return Err(match e.kind() {
            ErrorKind::PermissionDenied => Error::ReadDenied {
                path: path.to_path_buf(),
            },
            _ => Error::unexpected(path, e),
        });
    }

    if metadata.permissions().readonly() {
        return Err(Error::WriteDenied {
            path: path.to_path_buf(),
        });
    }
    // Opening for write without truncate leaves the contents untouched.
    if let Err(e) = OpenOptions::new().write(true).open(path) {
        return Err(match e.kind() {
            ErrorKind::PermissionDenied => Error::WriteDenied {
                path: path.to_path_buf(),
            },
            _ => Error::unexpected(path, e),
        });
    }

    Ok(())
}
