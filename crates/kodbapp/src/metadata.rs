//! Document metadata from `kodb.yaml`.
//!
//! The file is handed to the converter as is, so kodb only reads the few keys
//! it acts on and ignores the rest. Pandoc accepts `bibliography` as a single
//! path or a list; both are read.

use crate::error::Result;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMeta {
    pub title: Option<String>,
    pub bibliography: Vec<String>,
    pub csl: Option<String>,
}

impl ProjectMeta {
    /// Reads the metadata file. A missing file reads as empty metadata.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        if value.is_null() {
            return Ok(Self::default());
        }

        let bibliography = match value.get("bibliography") {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar).collect(),
            Some(item) => scalar(item).into_iter().collect(),
            None => Vec::new(),
        };

        Ok(Self {
            title: value.get("title").and_then(scalar),
            bibliography,
            csl: value.get("csl").and_then(scalar),
        })
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The metadata file written by `init`.
pub fn metadata_template(title: &str) -> String {
    format!(
        "title: '{}'\n\
         author: Author\n\
         date: \\today\n\
         eqnos-eqref: true\n\
         reference-section-title: References\n\
         bibliography: references.bib\n",
        title.replace('\'', "''")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_known_keys() {
        let meta = ProjectMeta::parse(
            "title: My Report\nauthor: Someone\nbibliography: refs.bib\ncsl: ieee.csl\n",
        )
        .unwrap();
        assert_eq!(meta.title.as_deref(), Some("My Report"));
        assert_eq!(meta.bibliography, vec!["refs.bib"]);
        assert_eq!(meta.csl.as_deref(), Some("ieee.csl"));
    }

    #[test]
    fn bibliography_may_be_a_list() {
        let meta = ProjectMeta::parse("bibliography:\n  - a.bib\n  - b.bib\n").unwrap();
        assert_eq!(meta.bibliography, vec!["a.bib", "b.bib"]);
    }

    #[test]
    fn empty_file_is_empty_metadata() {
        assert_eq!(ProjectMeta::parse("").unwrap(), ProjectMeta::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(ProjectMeta::parse("title: [unclosed").is_err());
    }

    #[test]
    fn template_round_trips_its_title() {
        let meta = ProjectMeta::parse(&metadata_template("Bob's: Thesis")).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Bob's: Thesis"));
        assert_eq!(meta.bibliography, vec!["references.bib"]);
    }

    #[test]
    fn missing_file_is_empty_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let meta = ProjectMeta::load(&dir.path().join("kodb.yaml")).unwrap();
        assert_eq!(meta, ProjectMeta::default());
    }
}
