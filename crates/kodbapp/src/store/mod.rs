//! # Storage Layer
//!
//! A project's document is the ordered set of Markdown files in `<root>/src`.
//! There is no index file or database: the order lives in the file names
//! themselves (`NN_name.md`), so the directory listing is the single source of
//! truth and every reorder is a batch of renames.
//!
//! ## Layers
//!
//! - [`SectionBackend`]: raw file I/O on bare file names.
//!   [`FsBackend`] for production, [`MemBackend`] for tests.
//! - [`SectionStore`]: parsing, ordering and renumbering. Keeps the indices
//!   contiguous (`0..N-1`) across insert, remove, swap and move.
//! - [`RenamePlan`]: collision checked, optionally staged renames.
//! - [`ProjectLock`]: advisory lock held by every mutation.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── kodb.yaml          # Project marker and document metadata
//! ├── .kodb.lock         # Present only while a mutation runs
//! └── src/
//!     ├── 00_abstract.md
//!     └── 01_introduction.md
//! ```

pub mod backend;
pub mod fs_backend;
pub mod lock;
pub mod mem_backend;
pub mod plan;
pub mod section_store;

pub use backend::SectionBackend;
pub use fs_backend::FsBackend;
pub use lock::{ProjectLock, LOCK_FILE_NAME};
pub use mem_backend::MemBackend;
pub use plan::RenamePlan;
pub use section_store::SectionStore;

/// The store used by the CLI.
pub type FileStore = SectionStore<FsBackend>;
