//! Filesystem writes for generated datasets.
//!
//! Files are staged in a temporary file next to their destination and renamed
//! into place, so an interrupted run never leaves a torn file where a
//! complete one used to be.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BackendResult, GenerateError};

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> BackendResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| GenerateError::io(dir, e))
}

/// Removes `path` if it exists.
pub fn remove_if_exists(path: &Path) -> BackendResult<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(GenerateError::io(path, e)),
        _ => Ok(()),
    }
}

/// Atomically replaces `path` with `bytes`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> BackendResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| GenerateError::io(dir, e))?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| GenerateError::io(path, e))?;
    staged
        .persist(path)
        .map_err(|e| GenerateError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("file.bin");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        // No staging files left behind
        let entries = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("file.bin");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }));
    }

    #[test]
    fn test_remove_if_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dataset_info.json");

        remove_if_exists(&path).unwrap();
        std::fs::write(&path, b"{}").unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());

        // A directory in the way is not silently ignored
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(
            remove_if_exists(&path),
            Err(GenerateError::Io { .. })
        ));
    }

    #[test]
    fn test_ensure_dir_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("elev+00");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
