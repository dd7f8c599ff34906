//! Import file path validation.

use crate::error::PathError;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Resolve `path` to an absolute path that exists, is a regular file and can
/// be opened for reading.
pub fn validate_json_path(path: impl AsRef<Path>) -> Result<PathBuf, PathError> {
    let path = path.as_ref();
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let metadata = match fs::metadata(&resolved) {
        Ok(m) => m,
        Err(_) => return Err(PathError::NotFound(resolved)),
    };

    if !metadata.is_file() {
        return Err(PathError::NotAFile(resolved));
    }

    if File::open(&resolved).is_err() {
        return Err(PathError::NotReadable(resolved));
    }

    Ok(resolved)
}

/// Validate `candidate`, falling back to `fallback_dir.join(candidate)`.
///
/// When both fail the error names the original candidate and carries the
/// first failure, since that is the path the operator actually typed.
pub fn resolve_json_path(candidate: &str, fallback_dir: &Path) -> Result<PathBuf, PathError> {
    let first_err = match validate_json_path(candidate) {
        Ok(path) => return Ok(path),
        Err(e) => e,
    };

    let alternative = fallback_dir.join(candidate);
    match validate_json_path(&alternative) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Using alternative path");
            Ok(path)
        }
        Err(_) => Err(PathError::Unresolved {
            candidate: candidate.to_string(),
            cause: Box::new(first_err),
        }),
    }
}
