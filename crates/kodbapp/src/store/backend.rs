use super::lock::ProjectLock;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw section file I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::SectionStore`] handles the "what": parsing, ordering and
/// renumbering. All names are bare file names inside the source directory.
pub trait SectionBackend {
    /// List every candidate section file name.
    /// Hidden files (leading `.`) and files without the `.md` extension are skipped.
    fn list_files(&self) -> Result<Vec<String>>;

    /// Full path of a file name inside the source directory.
    /// For `FsBackend` this is the real path, for `MemBackend` a virtual one.
    fn path_of(&self, file: &str) -> PathBuf;

    fn exists(&self, file: &str) -> bool;

    /// Read the content of a file. Returns Ok(None) if it does not exist.
    fn read(&self, file: &str) -> Result<Option<String>>;

    /// Create a file with the given content unless it already exists.
    /// Returns `true` if the file was created, `false` if it was left untouched.
    fn create_new(&self, file: &str, content: &str) -> Result<bool>;

    /// Rename a file. The caller guarantees `to` is free.
    fn rename(&self, from: &str, to: &str) -> Result<()>;

    fn remove(&self, file: &str) -> Result<()>;

    /// Take the project's advisory lock for the duration of a mutation.
    fn lock(&self) -> Result<ProjectLock>;
}
