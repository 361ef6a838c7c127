use super::backend::SectionBackend;
use super::lock::ProjectLock;
use crate::error::{KodbError, Result};
use crate::model::SECTION_EXT;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Filesystem backend: section files live directly in `<root>/src`.
pub struct FsBackend {
    root: PathBuf,
    src_dir: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf, src_dir: PathBuf) -> Self {
        Self { root, src_dir }
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.src_dir.exists() {
            fs::create_dir_all(&self.src_dir).map_err(KodbError::Io)?;
        }
        Ok(())
    }
}

impl SectionBackend for FsBackend {
    fn list_files(&self) -> Result<Vec<String>> {
        if !self.src_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.src_dir).map_err(KodbError::Io)? {
            let entry = entry.map_err(KodbError::Io)?;
            if !entry.file_type().map_err(KodbError::Io)?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("skipping non UTF-8 file name in {}", self.src_dir.display());
                continue;
            };
            if name.starts_with('.') || !name.ends_with(SECTION_EXT) {
                tracing::debug!("ignoring {} in source directory", name);
                continue;
            }
            files.push(name);
        }
        Ok(files)
    }

    fn path_of(&self, file: &str) -> PathBuf {
        self.src_dir.join(file)
    }

    fn exists(&self, file: &str) -> bool {
        self.path_of(file).exists()
    }

    fn read(&self, file: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_of(file)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KodbError::Io(e)),
        }
    }

    fn create_new(&self, file: &str, content: &str) -> Result<bool> {
        self.ensure_dir()?;
        let path = self.path_of(file);
        let mut handle = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(handle) => handle,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(KodbError::Io(e)),
        };
        handle.write_all(content.as_bytes()).map_err(KodbError::Io)?;
        Ok(true)
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        fs::rename(self.path_of(from), self.path_of(to)).map_err(KodbError::Io)
    }

    fn remove(&self, file: &str) -> Result<()> {
        fs::remove_file(self.path_of(file)).map_err(KodbError::Io)
    }

    fn lock(&self) -> Result<ProjectLock> {
        ProjectLock::acquire(&self.root)
    }
}
