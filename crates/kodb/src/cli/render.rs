//! # Rendering Module
//!
//! Turns `CmdResult` data into terminal text. Functions return `String`s and
//! never print, so tests can compare the output directly.
//!
//! ## List Layout
//!
//! ```text
//! My Thesis
//!
//!  0  abstract        src/00_abstract.md
//!  1  introduction    src/01_introduction.md
//! ```
//!
//! Indexes are right-aligned to the widest one, names padded to the longest,
//! and paths shown relative to the project root.

use super::styles::{ERROR, INDEX, MUTED, NAME, SUCCESS, TITLE, WARNING};
use kodbapp::commands::{CmdMessage, MessageLevel};
use kodbapp::model::Section;
use std::path::Path;

pub fn render_list(title: Option<&str>, sections: &[Section], root: &Path) -> String {
    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(&format!("{}\n\n", TITLE.apply_to(title)));
    }

    let index_width = sections
        .iter()
        .map(|s| s.index.to_string().len())
        .max()
        .unwrap_or(1);
    let name_width = sections.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);

    for section in sections {
        let path = section.path.strip_prefix(root).unwrap_or(&section.path);
        out.push_str(&format!(
            "{}  {}  {}\n",
            INDEX.apply_to(format!("{:>width$}", section.index, width = index_width + 1)),
            NAME.apply_to(format!("{:<width$}", section.name, width = name_width)),
            MUTED.apply_to(path.display())
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.clone(),
            MessageLevel::Success => SUCCESS.apply_to(&message.content).to_string(),
            MessageLevel::Warning => format!("{} {}", WARNING.apply_to("Warning:"), message.content),
            MessageLevel::Error => format!("{} {}", ERROR.apply_to("Error:"), message.content),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Splits a mutating command's messages into stdout and stderr text.
/// Confirmations (success and info) are only kept with `verbose`, warnings
/// and errors always go to stderr.
pub fn route_messages(messages: &[CmdMessage], verbose: bool) -> (String, String) {
    let (problems, confirmations): (Vec<CmdMessage>, Vec<CmdMessage>) = messages
        .iter()
        .cloned()
        .partition(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error));
    let out = if verbose {
        render_messages(&confirmations)
    } else {
        String::new()
    };
    (out, render_messages(&problems))
}
