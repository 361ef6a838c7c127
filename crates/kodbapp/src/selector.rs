//! # Section Selectors: Index vs Name
//!
//! Sections are referenced on the command line by a single token, which is
//! either their position or their name:
//!
//! - `kodb remove 2` targets the section at index 2.
//! - `kodb remove results` targets every section named `results`.
//!
//! A token that parses as an integer is **always** an index, so a section
//! literally named `2` can only be reached through its own index.
//! Name matching is exact and case-sensitive: `Results` does not match
//! `results`.
//!
//! Names are not unique. Two files may both be named `results` after a manual
//! rename, so resolution returns every match and leaves the zero / one / many
//! decision to the caller (see [`crate::store::SectionStore::resolve_one`] for
//! the non-interactive policy).

use crate::model::Section;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches the section whose index equals the value.
    /// Negative values are kept so they simply match nothing.
    Index(i64),
    Name(String),
}

impl Selector {
    pub fn parse(token: &str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(n) => Selector::Index(n),
            Err(_) => Selector::Name(token.to_string()),
        }
    }

    pub fn matches(&self, section: &Section) -> bool {
        match self {
            Selector::Index(n) => usize::try_from(*n).is_ok_and(|n| n == section.index),
            Selector::Name(name) => *name == section.name,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(n) => write!(f, "{}", n),
            Selector::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Parses an insertion or move position.
pub fn parse_position(token: &str) -> crate::error::Result<usize> {
    token
        .trim()
        .parse::<usize>()
        .map_err(|_| crate::error::KodbError::PositionParse(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn section(index: usize, name: &str) -> Section {
        Section::new(index, name, PathBuf::from(format!("{:02}_{}.md", index, name)))
    }

    #[test]
    fn integers_are_indexes() {
        assert_eq!(Selector::parse("3"), Selector::Index(3));
        assert_eq!(Selector::parse("-1"), Selector::Index(-1));
        assert_eq!(Selector::parse(" 0 "), Selector::Index(0));
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(Selector::parse("results"), Selector::Name("results".into()));
        assert_eq!(Selector::parse("2b"), Selector::Name("2b".into()));
    }

    #[test]
    fn index_matches_exactly() {
        let s = section(2, "method");
        assert!(Selector::parse("2").matches(&s));
        assert!(!Selector::parse("1").matches(&s));
        assert!(!Selector::parse("-2").matches(&s));
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let s = section(0, "results");
        assert!(Selector::parse("results").matches(&s));
        assert!(!Selector::parse("Results").matches(&s));
        assert!(!Selector::parse("result").matches(&s));
    }

    #[test]
    fn numeric_token_never_matches_by_name() {
        let s = section(4, "2");
        assert!(!Selector::parse("2").matches(&s));
        assert!(Selector::parse("4").matches(&s));
    }

    #[test]
    fn positions_must_be_non_negative_integers() {
        assert_eq!(parse_position("3").unwrap(), 3);
        assert!(matches!(
            parse_position("three"),
            Err(crate::error::KodbError::PositionParse(_))
        ));
        assert!(parse_position("-1").is_err());
    }
}
