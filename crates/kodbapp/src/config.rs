//! # Configuration
//!
//! Tool settings are managed by [`clapfig`], which handles layered loading from
//! TOML files, environment variables, and compiled defaults.
//!
//! Settings live in `kodb.toml`, which is separate from `kodb.yaml`: the YAML
//! file is document metadata handed to the converter untouched, the TOML file
//! only configures kodb itself.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `KODB__FILL_GAPS`, `KODB__ENGINE`, etc.
//! 2. **Project Config**: `<root>/kodb.toml`.
//! 3. **Global Config**: OS-appropriate config directory (via `directories`),
//!    or `$KODB_CONFIG_DIR` when set.
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `fill_gaps` | `false` | `kodb add` without a position fills the first numbering gap |
//! | `editor` | unset | Editor used by `kodb edit`, before `$EDITOR` |
//! | `converter` | `pandoc` | Markdown to TeX converter |
//! | `engine` | `tectonic` | TeX engine |
//! | `filters` | `["pandoc-xnos"]` | Filters passed to the converter |
//! | `output` | `main` | Name of the built document, without extension |

use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "kodb.toml";
const CONFIG_DIR_ENV: &str = "KODB_CONFIG_DIR";
const DATA_DIR_ENV: &str = "KODB_DATA_DIR";

fn default_filters() -> Vec<String> {
    vec!["pandoc-xnos".to_string()]
}

/// Configuration for kodb, stored in `kodb.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KodbConfig {
    /// Fill the first gap in the numbering instead of appending
    #[config(default = false)]
    pub fill_gaps: bool,

    /// Editor command for `kodb edit`
    pub editor: Option<String>,

    /// Markdown to TeX converter
    #[config(default = "pandoc")]
    pub converter: String,

    /// TeX engine producing the final document
    #[config(default = "tectonic")]
    pub engine: String,

    /// Filters passed to the converter.
    /// When absent, defaults to ["pandoc-xnos"].
    pub filters: Option<Vec<String>>,

    /// File name of the built document, without extension
    #[config(default = "main")]
    pub output: String,
}

impl Default for KodbConfig {
    fn default() -> Self {
        Self {
            fill_gaps: false,
            editor: None,
            converter: "pandoc".to_string(),
            engine: "tectonic".to_string(),
            filters: None,
            output: "main".to_string(),
        }
    }
}

impl KodbConfig {
    /// Get converter filters, using defaults if not configured.
    pub fn filters(&self) -> Vec<String> {
        self.filters.clone().unwrap_or_else(default_filters)
    }

    /// Every external program a build needs.
    pub fn required_programs(&self) -> Vec<String> {
        let mut programs = vec![self.converter.clone(), self.engine.clone()];
        programs.extend(self.filters());
        programs
    }
}

/// Directory holding the user-wide `kodb.toml`.
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var(CONFIG_DIR_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(|| ProjectDirs::from("com", "kodb", "kodb").map(|d| d.config_dir().to_path_buf()))
}

/// Directory for files kodb writes for itself, such as converter filters.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(|| ProjectDirs::from("com", "kodb", "kodb").map(|d| d.data_dir().to_path_buf()))
}

/// Loads settings for a project, merging the global file with the project's own.
///
/// Unreadable or invalid files fall back to the defaults.
pub fn load_config(project_root: Option<&Path>) -> KodbConfig {
    let mut search_paths = Vec::new();
    if let Some(global) = global_config_dir() {
        search_paths.push(SearchPath::Path(global));
    }
    if let Some(root) = project_root {
        search_paths.push(SearchPath::Path(root.to_path_buf()));
    }

    Clapfig::builder()
        .app_name("kodb")
        .file_name(CONFIG_FILE_NAME)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .strict(false)
        .load()
        .unwrap_or_else(|e| {
            tracing::warn!("ignoring invalid {}: {}", CONFIG_FILE_NAME, e);
            KodbConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KodbConfig::default();
        assert!(!config.fill_gaps);
        assert_eq!(config.converter, "pandoc");
        assert_eq!(config.engine, "tectonic");
        assert_eq!(config.output, "main");
        assert_eq!(config.filters(), vec!["pandoc-xnos"]);
    }

    #[test]
    fn test_custom_filters() {
        let config = KodbConfig {
            filters: Some(vec!["pandoc-crossref".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.filters(), vec!["pandoc-crossref"]);
    }

    #[test]
    fn test_required_programs() {
        let config = KodbConfig {
            filters: Some(vec![]),
            engine: "xelatex".to_string(),
            ..Default::default()
        };
        assert_eq!(config.required_programs(), vec!["pandoc", "xelatex"]);
    }
}
