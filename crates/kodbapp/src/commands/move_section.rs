use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Section;
use crate::store::{SectionBackend, SectionStore};

pub fn run<B: SectionBackend>(
    store: &SectionStore<B>,
    section: &Section,
    to: usize,
) -> Result<CmdResult> {
    let moved = store.move_section(section, to)?;

    let mut result = CmdResult::default();
    if moved.index == section.index {
        result.add_message(CmdMessage::info(format!(
            "Section {} is already at position {}",
            moved.name, moved.index
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Moved {} from {} to {}",
            moved.name, section.index, moved.index
        )));
    }
    Ok(result.with_affected_sections(vec![moved]))
}
