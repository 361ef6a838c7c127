use crate::commands::{CmdMessage, CmdResult, ProjectPaths};
use crate::error::Result;
use crate::metadata::ProjectMeta;
use crate::store::{SectionBackend, SectionStore};

/// Lists the sections in document order, with the document title when
/// `kodb.yaml` has one.
pub fn run<B: SectionBackend>(store: &SectionStore<B>, paths: &ProjectPaths) -> Result<CmdResult> {
    let sections = store.list_sections()?;
    let mut result = CmdResult::default();

    match ProjectMeta::load(&paths.metadata()) {
        Ok(meta) => result.title = meta.title,
        Err(e) => result.add_message(CmdMessage::warning(format!(
            "Could not read {}: {}",
            paths.metadata().display(),
            e
        ))),
    }

    if sections.is_empty() {
        result.add_message(CmdMessage::info("No sections yet. Add one with `kodb add <name>`."));
    }

    Ok(result.with_listed_sections(sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;
    use std::fs;

    #[test]
    fn lists_sections_with_title() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kodb.yaml"), "title: Report\n").unwrap();
        let store = SectionStore::with_backend(MemBackend::with_files([
            ("01_b.md", ""),
            ("00_a.md", ""),
        ]));

        let result = run(&store, &ProjectPaths::new(dir.path())).unwrap();

        assert_eq!(result.title.as_deref(), Some("Report"));
        let names: Vec<&str> = result.listed_sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn broken_metadata_is_only_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kodb.yaml"), "title: [oops").unwrap();
        let store = SectionStore::with_backend(MemBackend::new());

        let result = run(&store, &ProjectPaths::new(dir.path())).unwrap();

        assert!(result.title.is_none());
        assert_eq!(result.messages.len(), 2);
    }
}
