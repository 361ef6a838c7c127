use crate::commands::{CmdMessage, CmdResult, ProjectPaths};
use crate::error::{KodbError, Result};
use crate::metadata::ProjectMeta;
use crate::pipeline::{BuildInput, Pipeline};
use crate::store::{SectionBackend, SectionStore};
use std::path::{Path, PathBuf};

/// Compiles the document from its sections in order.
pub fn run<B: SectionBackend, P: Pipeline>(
    store: &SectionStore<B>,
    paths: &ProjectPaths,
    pipeline: &P,
) -> Result<CmdResult> {
    let sections = store.list_sections()?;
    if sections.is_empty() {
        return Err(KodbError::EmptyDocument);
    }

    let mut result = CmdResult::default();
    let metadata_path = paths.metadata();
    let meta = ProjectMeta::load(&metadata_path)?;

    let mut bibliographies = Vec::with_capacity(meta.bibliography.len());
    for name in &meta.bibliography {
        match find_asset(paths, name) {
            Some(path) => bibliographies.push(path),
            None => result.add_message(CmdMessage::warning(format!(
                "Bibliography {} not found, building without it",
                name
            ))),
        }
    }
    let csl = meta.csl.as_deref().and_then(|name| {
        let found = find_asset(paths, name);
        if found.is_none() {
            result.add_message(CmdMessage::warning(format!(
                "Citation style {} not found, using the default style",
                name
            )));
        }
        found
    });

    let input = BuildInput {
        sections: sections.into_iter().map(|s| s.path).collect(),
        metadata: metadata_path.is_file().then_some(metadata_path),
        bibliographies,
        csl,
    };

    let artifact = pipeline.compile(paths.root(), &input)?;
    result.add_message(CmdMessage::success(format!("Built {}", artifact.display())));
    Ok(result.with_paths(vec![artifact]))
}

/// Resolves a file named in the metadata: as given when absolute, otherwise
/// against the root and then `assets/`.
fn find_asset(paths: &ProjectPaths, name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    [paths.root.join(path), paths.assets().join(path)]
        .into_iter()
        .find(|candidate| candidate.is_file())
}
