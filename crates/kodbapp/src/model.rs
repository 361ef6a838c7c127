//! # Sections
//!
//! A document is an ordered list of [`Section`]s. Each section is backed by one
//! Markdown file in the project's `src/` directory, and its position in the
//! document is encoded in the file name:
//!
//! ```text
//! src/
//! ├── 00_abstract.md
//! ├── 01_introduction.md
//! └── 02_related_work.md
//! ```
//!
//! The in-memory [`Section`] carries the index as an explicit field. File names
//! are derived from `(index, name)` by [`section_file_name`] and parsed back by
//! [`parse_section_file_name`]; nothing else in the crate builds or splits file
//! names by hand.
//!
//! The name is everything after the first `_`, so names may themselves contain
//! underscores (`02_related_work.md` is `related_work` at index 2).

use crate::error::{KodbError, Result};
use serde::Serialize;
use std::path::PathBuf;

pub const SECTION_EXT: &str = ".md";
const INDEX_SEP: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub index: usize,
    pub name: String,
    pub path: PathBuf,
}

impl Section {
    pub fn new(index: usize, name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            index,
            name: name.into(),
            path,
        }
    }

    /// The file name this section is stored under, derived from its index and name.
    pub fn file_name(&self) -> String {
        section_file_name(self.index, &self.name)
    }
}

/// `(3, "results") -> "03_results.md"`
pub fn section_file_name(index: usize, name: &str) -> String {
    format!("{:02}{}{}{}", index, INDEX_SEP, name, SECTION_EXT)
}

/// Splits a section file name into its index and name.
///
/// Only the first `_` separates the index from the name. The `.md` extension is
/// stripped from the name.
pub fn parse_section_file_name(file_name: &str) -> Result<(usize, String)> {
    let malformed = || KodbError::MalformedSection(file_name.to_string());

    let stem = file_name.strip_suffix(SECTION_EXT).ok_or_else(malformed)?;
    let (prefix, name) = stem.split_once(INDEX_SEP).ok_or_else(malformed)?;

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index = prefix.parse::<usize>().map_err(|_| malformed())?;

    Ok((index, name.to_string()))
}

/// Checks that a user supplied name can be used as part of a file name.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(KodbError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Body written to a freshly created section.
///
/// `abstract` and `appendix` (any case) get LaTeX scaffolding, everything else a
/// level one heading with the capitalized name.
pub fn initial_content(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "abstract" => "\\begin{abstract}\n\n\\end{abstract}".to_string(),
        "appendix" => "\\clearpage\n\\appendix\n\n# Appendix\n\n".to_string(),
        _ => format!("# {}\n\n", capitalize(name)),
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(section_file_name(0, "intro"), "00_intro.md");
        assert_eq!(section_file_name(7, "results"), "07_results.md");
        assert_eq!(section_file_name(12, "appendix"), "12_appendix.md");
    }

    #[test]
    fn wide_indices_keep_all_digits() {
        assert_eq!(section_file_name(104, "late"), "104_late.md");
        assert_eq!(parse_section_file_name("104_late.md").unwrap(), (104, "late".into()));
    }

    #[test]
    fn parse_splits_on_first_underscore_only() {
        let (index, name) = parse_section_file_name("02_related_work.md").unwrap();
        assert_eq!(index, 2);
        assert_eq!(name, "related_work");
    }

    #[test]
    fn parse_keeps_spaces_and_dots_in_name() {
        let (index, name) = parse_section_file_name("05_This is v1.2.md").unwrap();
        assert_eq!(index, 5);
        assert_eq!(name, "This is v1.2");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(matches!(
            parse_section_file_name("intro.md"),
            Err(KodbError::MalformedSection(_))
        ));
        assert!(matches!(
            parse_section_file_name("ab_intro.md"),
            Err(KodbError::MalformedSection(_))
        ));
        assert!(matches!(
            parse_section_file_name("_intro.md"),
            Err(KodbError::MalformedSection(_))
        ));
        assert!(matches!(
            parse_section_file_name("-1_intro.md"),
            Err(KodbError::MalformedSection(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_separator_or_extension() {
        assert!(parse_section_file_name("03.md").is_err());
        assert!(parse_section_file_name("03_intro.txt").is_err());
    }

    #[test]
    fn section_file_name_matches_fields() {
        let section = Section::new(3, "method", PathBuf::from("/p/src/03_method.md"));
        assert_eq!(section.file_name(), "03_method.md");
    }

    #[test]
    fn initial_content_templates() {
        assert_eq!(initial_content("Abstract"), "\\begin{abstract}\n\n\\end{abstract}");
        assert!(initial_content("APPENDIX").starts_with("\\clearpage\n\\appendix"));
        assert_eq!(initial_content("introduction"), "# Introduction\n\n");
        assert_eq!(initial_content("mIxEd"), "# Mixed\n\n");
    }

    #[test]
    fn validate_name_rules() {
        assert!(validate_name("results").is_ok());
        assert!(validate_name("related work").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }
}
