//! # kodb CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/kodbapp/`: Core library: section store, resolver, build pipeline
//! - `crates/kodb/`: This CLI tool, depends on the `kodbapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/kodb/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch, prompts, editor launch (commands.rs)           │
//! │  - Terminal rendering via console styles (render.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/kodbapp/src/api.rs)                      │
//! │  - Parses positions, resolves tokens                        │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command + Store Layer (crates/kodbapp/src/{commands,store}) │
//! │  - Ordering invariants, renames, pipeline hand-off          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns every
//! user-facing concern: prompts for ambiguous tokens, confirmation before
//! removal, launching the editor, colors and exit codes.
//!
//! ## Exit Status
//!
//! Success exits 0. Any failure prints `Error: <message>` to stderr and exits 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
