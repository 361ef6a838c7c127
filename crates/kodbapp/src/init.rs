//! # Project Discovery
//!
//! A kodb project is any directory holding a `kodb.yaml`. Commands can be run
//! from anywhere inside it (`src/`, `assets/figures/`, ...), so the first step
//! of every command is to find that directory.
//!
//! ## Search Algorithm
//!
//! [`find_project_root`] walks upward from the starting directory:
//!
//! 1. Check: Does this directory contain `kodb.yaml`?
//! 2. **Match**: If yes, this is the project root. The closest match wins, so
//!    a project nested inside another resolves to the inner one.
//! 3. **No Match**: Move to the parent directory.
//! 4. **Stop**: After [`MAX_SEARCH_DEPTH`] directories (the starting one
//!    included), or at the filesystem root, fail with
//!    [`KodbError::ProjectNotFound`].
//!
//! The walk is bounded so that running kodb by accident deep inside an
//! unrelated tree never picks up a stray `kodb.yaml` near the filesystem root.

use crate::api::KodbApi;
use crate::commands::{ProjectPaths, METADATA_FILE};
use crate::config::{load_config, KodbConfig};
use crate::error::{KodbError, Result};
use crate::store::{FileStore, FsBackend};
use std::path::{Path, PathBuf};

/// Number of directories examined, counting the starting one.
pub const MAX_SEARCH_DEPTH: usize = 8;

pub struct KodbContext {
    pub api: KodbApi<FsBackend>,
    pub config: KodbConfig,
}

/// Finds the closest directory at or above `start` that contains `kodb.yaml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .take(MAX_SEARCH_DEPTH)
        .find(|dir| dir.join(METADATA_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| KodbError::ProjectNotFound {
            start: start.to_path_buf(),
            levels: MAX_SEARCH_DEPTH,
        })
}

/// Locates the project around `cwd` and wires up its store and settings.
pub fn initialize(cwd: &Path) -> Result<KodbContext> {
    let root = find_project_root(cwd)?;
    tracing::debug!("project root {}", root.display());

    let config = load_config(Some(&root));
    let paths = ProjectPaths::new(root);
    let store = FileStore::with_backend(FsBackend::new(paths.root.clone(), paths.src()));
    let api = KodbApi::new(store, paths, config.clone());

    Ok(KodbContext { api, config })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn nested(root: &Path, levels: usize) -> PathBuf {
        let mut dir = root.to_path_buf();
        for i in 0..levels {
            dir = dir.join(format!("d{}", i));
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(METADATA_FILE), "title: Test\n").unwrap();
        temp
    }

    #[test]
    fn finds_root_from_itself() {
        let temp = project();
        assert_eq!(find_project_root(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn finds_root_seven_levels_down() {
        let temp = project();
        let start = nested(temp.path(), 7);
        assert_eq!(find_project_root(&start).unwrap(), temp.path());
    }

    #[test]
    fn gives_up_eight_levels_down() {
        let temp = project();
        let start = nested(temp.path(), 8);
        assert!(matches!(
            find_project_root(&start),
            Err(KodbError::ProjectNotFound { levels: 8, .. })
        ));
    }

    #[test]
    fn gives_up_nine_levels_down() {
        let temp = project();
        let start = nested(temp.path(), 9);
        assert!(find_project_root(&start).is_err());
    }

    #[test]
    fn closest_project_wins() {
        let outer = project();
        let inner = nested(outer.path(), 2);
        fs::write(inner.join(METADATA_FILE), "").unwrap();
        let start = nested(&inner, 1);
        assert_eq!(find_project_root(&start).unwrap(), inner);
    }

    #[test]
    fn a_directory_named_like_the_marker_does_not_count() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(METADATA_FILE)).unwrap();
        assert!(find_project_root(temp.path()).is_err());
    }

    #[test]
    fn initialize_outside_a_project_fails() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            initialize(temp.path()),
            Err(KodbError::ProjectNotFound { .. })
        ));
    }
}
