//! # CLI Behavior
//!
//! This is **one possible UI client** for kodb, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Tokens
//!
//! Commands that take a section accept either its index (`kodb edit 2`) or its
//! name (`kodb edit results`). When a name matches several sections the CLI
//! lists the candidates and asks which one was meant. Entering `q`, or closing
//! stdin, cancels the command.
//!
//! ## Module Structure
//!
//! - `commands`: Logging setup, dispatch, editor and build wiring
//! - `complete`: Dynamic completion of section tokens
//! - `prompt`: Disambiguation and confirmation prompts
//! - `render`: Output formatting (section list, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod complete;
mod prompt;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
