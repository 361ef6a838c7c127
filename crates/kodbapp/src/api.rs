//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all kodb operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., parsing positions, resolving tokens)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Disambiguation**: When a token matches several sections, the `*_tokens`
//!   methods fail with [`crate::error::KodbError::AmbiguousSection`]. Interactive clients
//!   call [`KodbApi::resolve`], let the user pick, and pass the chosen
//!   [`Section`]s to the section taking methods.
//!
//! ## Generic Over SectionBackend
//!
//! `KodbApi<B: SectionBackend>` is generic over the storage backend:
//! - Production: `KodbApi<FsBackend>`
//! - Testing: `KodbApi<MemBackend>`

use crate::commands::{self, edit::EditTarget, CmdResult, ProjectPaths};
use crate::config::KodbConfig;
use crate::error::Result;
use crate::model::Section;
use crate::pipeline::{Counter, Pipeline};
use crate::selector::parse_position;
use crate::store::{SectionBackend, SectionStore};
use std::path::Path;

/// The main API facade for kodb operations.
pub struct KodbApi<B: SectionBackend> {
    store: SectionStore<B>,
    paths: ProjectPaths,
    config: KodbConfig,
}

impl<B: SectionBackend> KodbApi<B> {
    pub fn new(store: SectionStore<B>, paths: ProjectPaths, config: KodbConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn config(&self) -> &KodbConfig {
        &self.config
    }

    pub fn resolve(&self, token: &str) -> Result<Vec<Section>> {
        self.store.resolve(token)
    }

    /// `position` is the raw user input; it must be a non-negative integer.
    pub fn add(&self, name: &str, position: Option<&str>) -> Result<CmdResult> {
        let position = position.map(parse_position).transpose()?;
        commands::add::run(&self.store, name, position, self.config.fill_gaps)
    }

    pub fn remove(&self, sections: &[Section]) -> Result<CmdResult> {
        commands::remove::run(&self.store, sections)
    }

    /// Resolves every token before removing anything, so indices given on one
    /// command line all refer to the listing before the command ran.
    pub fn remove_tokens<I: AsRef<str>>(&self, tokens: &[I]) -> Result<CmdResult> {
        let sections = tokens
            .iter()
            .map(|t| self.store.resolve_one(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.remove(&sections)
    }

    pub fn switch(&self, a: &Section, b: &Section) -> Result<CmdResult> {
        commands::switch::run(&self.store, a, b)
    }

    pub fn switch_tokens(&self, a: &str, b: &str) -> Result<CmdResult> {
        let a = self.store.resolve_one(a)?;
        let b = self.store.resolve_one(b)?;
        self.switch(&a, &b)
    }

    pub fn move_section(&self, section: &Section, position: &str) -> Result<CmdResult> {
        let to = parse_position(position)?;
        commands::move_section::run(&self.store, section, to)
    }

    pub fn move_token(&self, token: &str, position: &str) -> Result<CmdResult> {
        let to = parse_position(position)?;
        let section = self.store.resolve_one(token)?;
        commands::move_section::run(&self.store, &section, to)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store, &self.paths)
    }

    pub fn edit_target(&self, token: Option<&str>) -> Result<EditTarget> {
        commands::edit::run(&self.store, &self.paths, token)
    }

    pub fn build<P: Pipeline>(&self, pipeline: &P) -> Result<CmdResult> {
        commands::build::run(&self.store, &self.paths, pipeline)
    }

    pub fn stats<C: Counter>(&self, counter: &C) -> Result<CmdResult> {
        commands::stats::run(&self.store, &self.paths, counter)
    }

    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.config)
    }
}

/// Creates a project. Needs no existing project, so it sits outside [`KodbApi`].
pub fn new_project(dir: &Path, with_default: bool) -> Result<CmdResult> {
    commands::init::run(dir, with_default)
}

/// Checks the external programs without a project, using only global settings.
pub fn check_programs(config: &KodbConfig) -> Result<CmdResult> {
    commands::check::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KodbError;
    use crate::store::MemBackend;

    fn api(files: &[(&str, &str)]) -> KodbApi<MemBackend> {
        KodbApi::new(
            SectionStore::with_backend(MemBackend::with_files(files.iter().copied())),
            ProjectPaths::new("/p"),
            KodbConfig::default(),
        )
    }

    fn names(api: &KodbApi<MemBackend>) -> Vec<String> {
        api.list()
            .unwrap()
            .listed_sections
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[test]
    fn add_parses_the_position() {
        let api = api(&[("00_a.md", ""), ("01_b.md", "")]);
        api.add("mid", Some("1")).unwrap();
        assert_eq!(names(&api), vec!["a", "mid", "b"]);
    }

    #[test]
    fn add_rejects_a_non_integer_position() {
        let api = api(&[("00_a.md", "")]);
        assert!(matches!(
            api.add("x", Some("first")),
            Err(KodbError::PositionParse(_))
        ));
        assert!(matches!(api.add("x", Some("-1")), Err(KodbError::PositionParse(_))));
        assert_eq!(names(&api), vec!["a"]);
    }

    #[test]
    fn add_honours_fill_gaps_setting() {
        let mut api = api(&[("00_a.md", ""), ("02_c.md", "")]);
        api.config.fill_gaps = true;
        let result = api.add("b", None).unwrap();
        assert_eq!(result.affected_sections[0].index, 1);
    }

    #[test]
    fn remove_tokens_refer_to_the_original_listing() {
        let api = api(&[("00_a.md", ""), ("01_b.md", ""), ("02_c.md", "")]);
        api.remove_tokens(&["0", "1"]).unwrap();
        assert_eq!(names(&api), vec!["c"]);
    }

    #[test]
    fn remove_tokens_fails_on_ambiguity_without_removing() {
        let api = api(&[("00_r.md", ""), ("01_r.md", ""), ("02_c.md", "")]);
        assert!(matches!(
            api.remove_tokens(&["c", "r"]),
            Err(KodbError::AmbiguousSection { .. })
        ));
        assert_eq!(names(&api).len(), 3);
    }

    #[test]
    fn switch_tokens_swaps() {
        let api = api(&[("00_intro.md", ""), ("01_methods.md", "")]);
        api.switch_tokens("intro", "1").unwrap();
        assert_eq!(names(&api), vec!["methods", "intro"]);
    }

    #[test]
    fn move_token_moves() {
        let api = api(&[("00_a.md", ""), ("01_b.md", ""), ("02_c.md", "")]);
        api.move_token("a", "2").unwrap();
        assert_eq!(names(&api), vec!["b", "c", "a"]);
        assert!(matches!(
            api.move_token("a", "last"),
            Err(KodbError::PositionParse(_))
        ));
    }
}
