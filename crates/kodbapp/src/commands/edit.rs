use crate::commands::ProjectPaths;
use crate::error::{KodbError, Result};
use crate::model::Section;
use crate::store::{SectionBackend, SectionStore};
use std::path::PathBuf;

/// Tokens that open the metadata file instead of a section.
const METADATA_TOKENS: &[&str] = &["kodb", "yaml", "kodb.yaml"];

/// What `kodb edit` opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// The whole source directory, when no token is given.
    Sources(PathBuf),
    Metadata(PathBuf),
    /// One or more matching sections. More than one needs disambiguation.
    Sections(Vec<Section>),
}

pub fn run<B: SectionBackend>(
    store: &SectionStore<B>,
    paths: &ProjectPaths,
    token: Option<&str>,
) -> Result<EditTarget> {
    let Some(token) = token else {
        return Ok(EditTarget::Sources(paths.src()));
    };
    if METADATA_TOKENS.contains(&token) {
        return Ok(EditTarget::Metadata(paths.metadata()));
    }

    let sections = store.resolve(token)?;
    if sections.is_empty() {
        return Err(KodbError::SectionNotFound(token.to_string()));
    }
    Ok(EditTarget::Sections(sections))
}
