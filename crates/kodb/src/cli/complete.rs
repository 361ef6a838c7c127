//! Shell completion support using clap_complete's dynamic completion.
//!
//! Section arguments complete to both indexes and names of the project around
//! the current directory.

use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};
use kodbapp::init::initialize;
use std::path::PathBuf;

fn section_candidates() -> Vec<CompletionCandidate> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let Ok(ctx) = initialize(&cwd) else {
        return vec![];
    };
    let Ok(result) = ctx.api.list() else {
        return vec![];
    };

    let mut candidates = Vec::new();
    for section in result.listed_sections {
        let index = section.index.to_string();
        candidates.push(
            CompletionCandidate::new(index.clone())
                .help(Some(section.name.clone().into()))
                .display_order(Some(0)),
        );
        candidates.push(
            CompletionCandidate::new(section.name)
                .help(Some(format!("({})", index).into()))
                .display_order(Some(1)),
        );
    }
    candidates
}

/// Completer for arguments naming a section (remove, switch, move, edit)
pub fn sections_completer() -> ArgValueCandidates {
    ArgValueCandidates::new(section_candidates)
}
