use super::backend::SectionBackend;
use super::lock::ProjectLock;
use crate::error::{KodbError, Result};
use crate::model::SECTION_EXT;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since kodb is single-threaded.
/// Keeps a log of every rename so tests can check the order operations ran in.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<BTreeMap<String, String>>,
    renames: RefCell<Vec<(String, String)>>,
    rename_attempts: Cell<usize>,
    fail_rename: Cell<Option<usize>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: a backend pre-populated with the given `(file name, content)` pairs.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let backend = Self::new();
        backend.files.borrow_mut().extend(
            files
                .into_iter()
                .map(|(name, content)| (name.to_string(), content.to_string())),
        );
        backend
    }

    /// Test helper: every file name currently stored, sorted.
    pub fn file_names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Test helper: every rename performed so far, in order.
    pub fn rename_log(&self) -> Vec<(String, String)> {
        self.renames.borrow().clone()
    }

    /// Test helper: makes the `n`th rename attempt from now on (0-based) fail
    /// with a permission error. Later attempts succeed again.
    pub fn fail_rename_at(&self, n: usize) {
        self.fail_rename.set(Some(self.rename_attempts.get() + n));
    }
}

fn not_found(file: &str) -> KodbError {
    KodbError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", file),
    ))
}

impl SectionBackend for MemBackend {
    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|name| !name.starts_with('.') && name.ends_with(SECTION_EXT))
            .cloned()
            .collect())
    }

    fn path_of(&self, file: &str) -> PathBuf {
        PathBuf::from(format!("memory://src/{}", file))
    }

    fn exists(&self, file: &str) -> bool {
        self.files.borrow().contains_key(file)
    }

    fn read(&self, file: &str) -> Result<Option<String>> {
        Ok(self.files.borrow().get(file).cloned())
    }

    fn create_new(&self, file: &str, content: &str) -> Result<bool> {
        let mut files = self.files.borrow_mut();
        if files.contains_key(file) {
            return Ok(false);
        }
        files.insert(file.to_string(), content.to_string());
        Ok(true)
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let attempt = self.rename_attempts.get();
        self.rename_attempts.set(attempt + 1);
        if self.fail_rename.get() == Some(attempt) {
            return Err(KodbError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot rename {} to {}", from, to),
            )));
        }

        let mut files = self.files.borrow_mut();
        let content = files.remove(from).ok_or_else(|| not_found(from))?;
        // Mirrors rename(2): an existing target is replaced
        files.insert(to.to_string(), content);
        self.renames
            .borrow_mut()
            .push((from.to_string(), to.to_string()));
        Ok(())
    }

    fn remove(&self, file: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .remove(file)
            .map(|_| ())
            .ok_or_else(|| not_found(file))
    }

    fn lock(&self) -> Result<ProjectLock> {
        Ok(ProjectLock::noop())
    }
}
