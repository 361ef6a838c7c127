use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Section;
use crate::store::{SectionBackend, SectionStore};

/// Removes already resolved sections and closes the gaps.
pub fn run<B: SectionBackend>(store: &SectionStore<B>, sections: &[Section]) -> Result<CmdResult> {
    store.remove_sections(sections)?;

    let mut removed = sections.to_vec();
    removed.sort_by_key(|s| s.index);
    removed.dedup_by(|a, b| a.path == b.path);

    let mut result = CmdResult::default();
    for section in &removed {
        result.add_message(CmdMessage::success(format!(
            "Removed section {} ({})",
            section.name, section.index
        )));
    }
    Ok(result.with_affected_sections(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;

    #[test]
    fn removes_and_renumbers() {
        let store = SectionStore::with_backend(MemBackend::with_files([
            ("00_a.md", ""),
            ("01_b.md", ""),
            ("02_c.md", ""),
        ]));
        let a = store.resolve_one("a").unwrap();
        let c = store.resolve_one("c").unwrap();

        let result = run(&store, &[c, a]).unwrap();

        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.affected_sections[0].name, "a");
        let left = store.list_sections().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!((left[0].index, left[0].name.as_str()), (0, "b"));
    }
}
