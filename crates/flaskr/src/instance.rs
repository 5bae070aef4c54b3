//! Instance directory handling.
//!
//! The instance directory lives outside the package and holds local files
//! that should not be committed: the optional `config.toml` and the `SQLite`
//! database.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Resolve `path` against the current working directory if it is relative.
///
/// # Errors
///
/// Returns an error if the current working directory cannot be determined.
pub fn resolve_instance_path(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Ensure the instance directory exists, creating missing parents.
///
/// An existing directory counts as success. Every other failure, including
/// a regular file sitting at `path`, is reported.
///
/// # Errors
///
/// Returns [`Error::DirectoryCreate`] if the directory cannot be created.
pub fn ensure_instance_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(()) => {
            debug!("Instance directory ready at {}", path.display());
            Ok(())
        }
        Err(source) if source.kind() == ErrorKind::AlreadyExists && path.is_dir() => {
            debug!("Instance directory already exists at {}", path.display());
            Ok(())
        }
        Err(source) => Err(Error::DirectoryCreate {
            path: path.to_path_buf(),
            source,
        }),
    }
}
