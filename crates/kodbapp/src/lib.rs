//! # kodb
//!
//! kodb manages a document written as an ordered set of Markdown files and
//! builds it into a PDF through pandoc and tectonic.
//!
//! ```text
//! thesis/
//! ├── kodb.yaml              # Project marker, pandoc metadata
//! ├── kodb.toml              # Optional tool settings
//! ├── assets/
//! │   └── references.bib
//! └── src/
//!     ├── 00_abstract.md
//!     ├── 01_introduction.md
//!     └── 02_results.md
//! ```
//!
//! Document order is encoded in the file names. Adding a section in the middle,
//! removing one or swapping two renames files so the prefixes always run
//! `00, 01, .., N-1` with no gaps.
//!
//! ## Architecture
//!
//! This crate is UI agnostic. The `kodb` binary is one client of it.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  API (api.rs)                                │
//! │  - KodbApi<B>: one method per operation      │
//! │  - Parses positions, resolves tokens         │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                    │
//! │  - Business logic, returns CmdResult         │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │  Store (store/*.rs)      Pipeline            │
//! │  - SectionStore<B>       - pandoc, tectonic  │
//! │  - FsBackend / MemBackend                    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`init::initialize`] finds the project root and wires these together.

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod selector;
pub mod store;
