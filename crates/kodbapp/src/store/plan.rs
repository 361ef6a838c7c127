//! # Rename Plans
//!
//! Renumbering sections means renaming several files, and renaming file `A` to
//! a name that another file in the same batch still holds would overwrite it.
//! Swapping two sections that share a name is the classic case:
//! `01_results.md -> 02_results.md` and `02_results.md -> 01_results.md`.
//!
//! A [`RenamePlan`] collects every rename of one operation before touching the
//! store, then:
//!
//! 1. Drops no-op moves.
//! 2. Rejects plans where two files would end up with the same name, or where a
//!    target is held by a file outside the plan.
//! 3. Applies the moves directly, in the order given, when no target is also a
//!    source.
//! 4. Otherwise moves every file to a unique hidden staging name first and then
//!    to its target (a double-buffered rename). Hidden names never show up in
//!    section listings.
//!
//! If a rename fails midway, the renames already made are reversed before the
//! error surfaces, so no section is left hidden under a staging name.

use super::backend::SectionBackend;
use crate::error::{KodbError, Result};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    moves: Vec<(String, String)>,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let (from, to) = (from.into(), to.into());
        if from != to {
            self.moves.push((from, to));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether some target is still held by a file this plan moves away.
    pub fn needs_staging(&self) -> bool {
        let sources: HashSet<&str> = self.moves.iter().map(|(from, _)| from.as_str()).collect();
        self.moves.iter().any(|(_, to)| sources.contains(to.as_str()))
    }

    fn validate<B: SectionBackend>(&self, backend: &B) -> Result<()> {
        let sources: HashSet<&str> = self.moves.iter().map(|(from, _)| from.as_str()).collect();
        let mut targets = HashSet::new();

        for (from, to) in &self.moves {
            let conflict = !targets.insert(to.as_str())
                || (backend.exists(to) && !sources.contains(to.as_str()));
            if conflict {
                return Err(KodbError::RenameConflict {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
        Ok(())
    }

    /// Applies every move. When a rename fails, the moves already made are
    /// undone before the error is returned, so the listing is left as it was.
    pub fn apply<B: SectionBackend>(self, backend: &B) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        self.validate(backend)?;

        if self.needs_staging() {
            return self.apply_staged(backend);
        }

        for (i, (from, to)) in self.moves.iter().enumerate() {
            tracing::debug!("rename {} -> {}", from, to);
            if let Err(e) = backend.rename(from, to) {
                let done = self.moves[..i].iter().rev();
                roll_back(backend, done.map(|(from, to)| (to.as_str(), from.as_str())));
                return Err(e);
            }
        }
        Ok(())
    }

    fn apply_staged<B: SectionBackend>(&self, backend: &B) -> Result<()> {
        // The original name is kept in the staging name so a file stranded by
        // a failed rollback can still be identified by hand
        let stages: Vec<String> = self
            .moves
            .iter()
            .map(|(from, _)| format!(".stage-{}-{}", Uuid::new_v4(), from))
            .collect();
        let (staged, moves) = (&stages, &self.moves);
        let unstage = move |count: usize| {
            (0..count)
                .rev()
                .map(move |j| (staged[j].as_str(), moves[j].0.as_str()))
        };

        for (i, ((from, _), stage)) in self.moves.iter().zip(&stages).enumerate() {
            tracing::debug!("stage {} -> {}", from, stage);
            if let Err(e) = backend.rename(from, stage) {
                roll_back(backend, unstage(i));
                return Err(e);
            }
        }

        for (i, ((_, to), stage)) in self.moves.iter().zip(&stages).enumerate() {
            tracing::debug!("rename {} -> {}", stage, to);
            if let Err(e) = backend.rename(stage, to) {
                // Targets go back to staging first, freeing every original name
                let placed = (0..i).rev().map(|j| (self.moves[j].1.as_str(), stages[j].as_str()));
                roll_back(backend, placed);
                roll_back(backend, unstage(stages.len()));
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Best-effort undo of renames. A move whose destination is taken is skipped
/// rather than overwriting anything.
fn roll_back<'a, B: SectionBackend>(backend: &B, moves: impl Iterator<Item = (&'a str, &'a str)>) {
    for (from, to) in moves {
        if backend.exists(to) {
            tracing::warn!("cannot restore {} to {}: target exists", from, to);
            continue;
        }
        match backend.rename(from, to) {
            Ok(()) => tracing::debug!("restored {} -> {}", from, to),
            Err(e) => tracing::warn!("cannot restore {} to {}: {}", from, to, e),
        }
    }
}
