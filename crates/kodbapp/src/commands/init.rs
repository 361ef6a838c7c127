use crate::commands::{CmdMessage, CmdResult, ProjectPaths};
use crate::error::{KodbError, Result};
use crate::metadata::metadata_template;
use crate::model::capitalize;
use crate::store::{FsBackend, SectionStore};
use std::fs;
use std::path::Path;

/// Sections created by `--default`, in order.
pub const DEFAULT_STRUCTURE: &[&str] = &[
    "abstract",
    "introduction",
    "theory",
    "results",
    "discussion",
    "conclusion",
    "references",
    "appendix",
];

const BIBLIOGRAPHY_FILE: &str = "references.bib";

/// Creates a project in `dir`, creating the directory itself if needed.
pub fn run(dir: &Path, with_default: bool) -> Result<CmdResult> {
    fs::create_dir_all(dir)?;
    let root = dir.canonicalize()?;
    let paths = ProjectPaths::new(&root);

    if paths.metadata().exists() {
        return Err(KodbError::AlreadyInitialized(root));
    }

    fs::create_dir_all(paths.src())?;
    fs::create_dir_all(paths.assets())?;

    let title = root
        .file_name()
        .map(|name| capitalize(&name.to_string_lossy()))
        .unwrap_or_else(|| "Document".to_string());
    fs::write(paths.metadata(), metadata_template(&title))?;

    let bibliography = paths.assets().join(BIBLIOGRAPHY_FILE);
    if !bibliography.exists() {
        fs::write(&bibliography, "")?;
    }
    tracing::info!("initialized project at {}", root.display());

    let mut affected = Vec::new();
    if with_default {
        let store = SectionStore::with_backend(FsBackend::new(root.clone(), paths.src()));
        for name in DEFAULT_STRUCTURE {
            affected.push(store.insert(name, None, false)?);
        }
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized kodb project at {}",
        root.display()
    )));
    Ok(result.with_affected_sections(affected).with_paths(vec![root]))
}
