use crate::error::{KodbError, Result};
use crate::pipeline::find_program;
use std::env;
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITORS: &[&str] = &["nvim", "code", "vim", "vi", "nano"];

/// Picks the editor command.
/// Checks the configured editor, $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor(configured: Option<&str>) -> Result<String> {
    if let Some(editor) = configured.filter(|e| !e.trim().is_empty()) {
        return Ok(editor.to_string());
    }

    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    FALLBACK_EDITORS
        .iter()
        .find(|name| find_program(name).is_some())
        .map(|name| name.to_string())
        .ok_or_else(|| KodbError::Editor("No editor found. Set $EDITOR environment variable.".to_string()))
}

/// Opens a file or directory in the editor and waits for it to close.
///
/// The editor command may carry arguments (`code --wait`).
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| KodbError::Editor("Editor command is empty".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| KodbError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(KodbError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }
    Ok(())
}
