use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{SectionBackend, SectionStore};

pub fn run<B: SectionBackend>(
    store: &SectionStore<B>,
    name: &str,
    position: Option<usize>,
    fill_gaps: bool,
) -> Result<CmdResult> {
    let before = store.list_sections()?.len();
    let section = store.insert(name, position, fill_gaps)?;
    let created = store.list_sections()?.len() > before;

    let mut result = CmdResult::default();
    if created {
        result.add_message(CmdMessage::success(format!(
            "Added section {} at position {}",
            section.name, section.index
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Section {} already exists at position {}",
            section.name, section.index
        )));
    }
    Ok(result.with_affected_sections(vec![section]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::MemBackend;

    #[test]
    fn reports_a_new_section() {
        let store = SectionStore::with_backend(MemBackend::new());
        let result = run(&store, "intro", None, false).unwrap();

        assert_eq!(result.affected_sections.len(), 1);
        assert_eq!(result.affected_sections[0].index, 0);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn reports_an_existing_section() {
        let store = SectionStore::with_backend(MemBackend::with_files([("00_intro.md", "x")]));
        let result = run(&store, "intro", None, false).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("already exists"));
    }

    #[test]
    fn inserts_at_a_position() {
        let store = SectionStore::with_backend(MemBackend::with_files([
            ("00_a.md", ""),
            ("01_b.md", ""),
        ]));
        let result = run(&store, "between", Some(1), false).unwrap();
        assert_eq!(result.affected_sections[0].index, 1);
        assert_eq!(store.list_sections().unwrap().len(), 3);
    }
}
