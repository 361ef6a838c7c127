use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Section;
use crate::store::{SectionBackend, SectionStore};

pub fn run<B: SectionBackend>(
    store: &SectionStore<B>,
    a: &Section,
    b: &Section,
) -> Result<CmdResult> {
    let (a, b) = store.swap_sections(a, b)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Switched {} ({}) and {} ({})",
        a.name, a.index, b.name, b.index
    )));
    Ok(result.with_affected_sections(vec![a, b]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemBackend;

    #[test]
    fn reports_new_positions() {
        let store = SectionStore::with_backend(MemBackend::with_files([
            ("00_intro.md", ""),
            ("01_methods.md", ""),
        ]));
        let intro = store.resolve_one("intro").unwrap();
        let methods = store.resolve_one("methods").unwrap();

        let result = run(&store, &intro, &methods).unwrap();

        assert_eq!(result.affected_sections[0].name, "intro");
        assert_eq!(result.affected_sections[0].index, 1);
        assert_eq!(result.affected_sections[1].index, 0);
    }
}
