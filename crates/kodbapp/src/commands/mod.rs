//! # Command Layer
//!
//! This module contains the **core business logic** of kodb. Each command lives in its
//! own submodule and implements plain Rust functions over the store and the project
//! layout.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//! - **User interaction**: No prompts or confirmations. Commands that need a
//!   single section take an already resolved [`Section`]; picking one out of an
//!   ambiguous match is up to the UI.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected_sections`: Sections created, moved or removed (post-operation state
//!   for survivors, pre-removal state for removed ones)
//! - `listed_sections`: Sections to display
//! - `paths`: File paths produced (build artifact, project root)
//! - `messages`: Structured messages with levels
//!
//! ## Testing Strategy
//!
//! Command tests use `MemBackend` where only the store is involved and
//! `tempfile` where the project layout on disk matters.
//!
//! ## Command Modules
//!
//! - [`init`]: Create a project
//! - [`add`]: Insert a section
//! - [`remove`]: Remove sections
//! - [`switch`]: Swap two sections
//! - [`move_section`]: Move a section to a position
//! - [`list`]: List sections with the document title
//! - [`edit`]: Work out which file an edit opens
//! - [`build`]: Hand the ordered sections to the pipeline
//! - [`check`]: Look for the external programs on `PATH`
//! - [`stats`]: Count the words of the document

use crate::model::Section;
use crate::store::LOCK_FILE_NAME;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod add;
pub mod build;
pub mod check;
pub mod edit;
pub mod init;
pub mod list;
pub mod move_section;
pub mod remove;
pub mod stats;
pub mod switch;

/// Marker file, and the pandoc metadata of the document.
pub const METADATA_FILE: &str = "kodb.yaml";
pub const SRC_DIR: &str = "src";
pub const ASSETS_DIR: &str = "assets";

/// Fixed layout of a project below its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    pub fn assets(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn metadata(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.root.join(LOCK_FILE_NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_sections: Vec<Section>,
    pub listed_sections: Vec<Section>,
    pub paths: Vec<PathBuf>,
    pub title: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_sections(mut self, sections: Vec<Section>) -> Self {
        self.affected_sections = sections;
        self
    }

    pub fn with_listed_sections(mut self, sections: Vec<Section>) -> Self {
        self.listed_sections = sections;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
