//! Advisory project lock.
//!
//! Section renames are not transactional, so two kodb processes renumbering
//! the same project at once could interleave their renames. Every mutating
//! store operation holds a [`ProjectLock`], which is a lock file created
//! exclusively in the project root and removed when the guard drops.
//!
//! A process killed mid-operation leaves the file behind; it then has to be
//! removed by hand, which the [`KodbError::Locked`] message points out.

use crate::error::{KodbError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = ".kodb.lock";

#[derive(Debug)]
pub struct ProjectLock {
    path: Option<PathBuf>,
}

impl ProjectLock {
    pub fn acquire(root: &Path) -> Result<Self> {
        let path = root.join(LOCK_FILE_NAME);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(KodbError::Locked(path));
            }
            Err(e) => return Err(KodbError::Io(e)),
        };
        // The pid is informational only
        let _ = writeln!(file, "{}", std::process::id());
        tracing::debug!("acquired lock {}", path.display());
        Ok(Self { path: Some(path) })
    }

    /// A guard that locks nothing, for backends without a filesystem.
    pub fn noop() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("could not release lock {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_file_exists_while_held() {
        let temp = TempDir::new().unwrap();
        let lock = ProjectLock::acquire(temp.path()).unwrap();
        assert!(temp.path().join(LOCK_FILE_NAME).exists());
        drop(lock);
        assert!(!temp.path().join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn second_acquire_fails() {
        let temp = TempDir::new().unwrap();
        let _held = ProjectLock::acquire(temp.path()).unwrap();
        let result = ProjectLock::acquire(temp.path());
        assert!(matches!(result, Err(KodbError::Locked(_))));
    }

    #[test]
    fn stale_lock_blocks_until_removed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(LOCK_FILE_NAME), "4242\n").unwrap();
        assert!(ProjectLock::acquire(temp.path()).is_err());

        fs::remove_file(temp.path().join(LOCK_FILE_NAME)).unwrap();
        assert!(ProjectLock::acquire(temp.path()).is_ok());
    }

    #[test]
    fn noop_lock_has_no_path() {
        let lock = ProjectLock::noop();
        assert!(lock.path().is_none());
    }
}
