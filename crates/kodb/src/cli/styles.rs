//! Styles for the kodb CLI.
//!
//! Output code refers to these by meaning (an index, a muted path) rather than
//! by color, so the palette can change in one place. `console` drops the
//! escape codes on its own when the output is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static NAME: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());

pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());
