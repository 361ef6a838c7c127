use super::backend::SectionBackend;
use super::plan::RenamePlan;
use crate::error::{KodbError, Result};
use crate::model::{initial_content, parse_section_file_name, section_file_name, validate_name, Section};
use crate::selector::Selector;

/// The ordered collection of sections in a project's source directory.
///
/// Every mutating operation takes the backend's lock, reads a fresh listing,
/// plans its renames and applies them before returning. Sections handed out by
/// the store are snapshots: after a mutation, list again.
pub struct SectionStore<B: SectionBackend> {
    pub(crate) backend: B,
}

impl<B: SectionBackend> SectionStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All sections, sorted by index (ties broken by name).
    pub fn list_sections(&self) -> Result<Vec<Section>> {
        let mut sections = self
            .backend
            .list_files()?
            .into_iter()
            .map(|file| {
                let (index, name) = parse_section_file_name(&file)?;
                Ok(Section::new(index, name, self.backend.path_of(&file)))
            })
            .collect::<Result<Vec<_>>>()?;

        sections.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
        Ok(sections)
    }

    /// Every section the token selects. Zero, one or many.
    pub fn resolve(&self, token: &str) -> Result<Vec<Section>> {
        let selector = Selector::parse(token);
        Ok(self
            .list_sections()?
            .into_iter()
            .filter(|s| selector.matches(s))
            .collect())
    }

    /// Resolves a token that must name exactly one section.
    pub fn resolve_one(&self, token: &str) -> Result<Section> {
        let mut matches = self.resolve(token)?;
        match matches.len() {
            0 => Err(KodbError::SectionNotFound(token.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(KodbError::AmbiguousSection {
                token: token.to_string(),
                candidates: matches.into_iter().map(|s| s.path).collect(),
            }),
        }
    }

    pub fn read(&self, section: &Section) -> Result<Option<String>> {
        self.backend.read(&file_of(section))
    }

    /// Adds a section named `name`.
    ///
    /// With a position, sections at or above it move up by one and the new
    /// section takes its place. The position is clamped to the end.
    ///
    /// Without a position, an existing section with exactly this name is
    /// returned as is, wherever it sits, so adding a name twice never creates
    /// a duplicate. Otherwise the section is appended, or put in the first
    /// numbering gap when `fill_gaps` is set. A second section with the same
    /// name can only be created with an explicit position.
    pub fn insert(&self, name: &str, at_index: Option<usize>, fill_gaps: bool) -> Result<Section> {
        validate_name(name)?;
        let _lock = self.backend.lock()?;
        let sections = self.list_sections()?;
        let end = next_index(&sections);

        let index = match at_index {
            Some(at) => {
                let at = at.min(end);
                let mut plan = RenamePlan::new();
                for s in sections.iter().rev().filter(|s| s.index >= at) {
                    plan.push(file_of(s), section_file_name(s.index + 1, &s.name));
                }
                plan.apply(&self.backend)?;
                at
            }
            None => {
                if let Some(existing) = sections.iter().find(|s| s.name == name) {
                    tracing::debug!("section {} already exists", existing.file_name());
                    return Ok(existing.clone());
                }
                if fill_gaps {
                    first_gap(&sections).unwrap_or(end)
                } else {
                    end
                }
            }
        };

        let file = section_file_name(index, name);
        if self.backend.create_new(&file, &initial_content(name))? {
            tracing::info!("created {}", file);
        } else {
            tracing::debug!("{} exists, content left untouched", file);
        }
        Ok(Section::new(index, name, self.backend.path_of(&file)))
    }

    /// Removes the single section the token selects.
    pub fn remove(&self, token: &str) -> Result<Section> {
        let section = self.resolve_one(token)?;
        self.remove_section(&section)?;
        Ok(section)
    }

    pub fn remove_section(&self, section: &Section) -> Result<()> {
        self.remove_sections(std::slice::from_ref(section))
    }

    /// Removes several sections under one lock, closing the gaps they leave.
    ///
    /// Sections are removed from the highest index down, so the snapshots
    /// passed in stay valid while the batch runs.
    pub fn remove_sections(&self, sections: &[Section]) -> Result<()> {
        let _lock = self.backend.lock()?;

        let mut targets: Vec<&Section> = sections.iter().collect();
        targets.sort_by(|a, b| b.index.cmp(&a.index).then_with(|| b.name.cmp(&a.name)));
        targets.dedup_by(|a, b| a.path == b.path);

        for target in targets {
            let file = file_of(target);
            if !self.backend.exists(&file) {
                return Err(KodbError::SectionNotFound(target.name.clone()));
            }
            self.backend.remove(&file)?;
            tracing::info!("removed {}", file);

            let mut plan = RenamePlan::new();
            for s in self.list_sections()?.iter().filter(|s| s.index > target.index) {
                plan.push(file_of(s), section_file_name(s.index - 1, &s.name));
            }
            plan.apply(&self.backend)?;
        }
        Ok(())
    }

    /// Exchanges the positions of the two sections the tokens select.
    pub fn swap(&self, token_a: &str, token_b: &str) -> Result<(Section, Section)> {
        let a = self.resolve_one(token_a)?;
        let b = self.resolve_one(token_b)?;
        self.swap_sections(&a, &b)
    }

    /// Exchanges two sections' indices. Names and contents stay with their
    /// files. Returns both sections at their new positions.
    pub fn swap_sections(&self, a: &Section, b: &Section) -> Result<(Section, Section)> {
        if a.path == b.path {
            return Ok((a.clone(), b.clone()));
        }
        let _lock = self.backend.lock()?;

        let a_file = section_file_name(b.index, &a.name);
        let b_file = section_file_name(a.index, &b.name);
        let mut plan = RenamePlan::new();
        plan.push(file_of(a), a_file.clone());
        plan.push(file_of(b), b_file.clone());
        plan.apply(&self.backend)?;
        tracing::info!("swapped {} and {}", a.name, b.name);

        Ok((
            Section::new(b.index, a.name.clone(), self.backend.path_of(&a_file)),
            Section::new(a.index, b.name.clone(), self.backend.path_of(&b_file)),
        ))
    }

    /// Moves a section to position `to`, clamped to the last position.
    /// Sections in between shift by one towards the vacated slot.
    pub fn move_section(&self, section: &Section, to: usize) -> Result<Section> {
        let _lock = self.backend.lock()?;
        let mut sections = self.list_sections()?;

        let from = sections
            .iter()
            .position(|s| s.path == section.path)
            .ok_or_else(|| KodbError::SectionNotFound(section.name.clone()))?;
        let to = to.min(sections.len() - 1);

        let moving = sections.remove(from);
        sections.insert(to, moving);

        let mut plan = RenamePlan::new();
        for (index, s) in sections.iter().enumerate() {
            plan.push(file_of(s), section_file_name(index, &s.name));
        }
        plan.apply(&self.backend)?;
        tracing::info!("moved {} to {}", section.name, to);

        let file = section_file_name(to, &section.name);
        Ok(Section::new(to, section.name.clone(), self.backend.path_of(&file)))
    }
}

/// The file name a section is actually stored under, which may differ from
/// its canonical name when the file was created by hand (`3_notes.md`).
fn file_of(section: &Section) -> String {
    section
        .path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| section.file_name())
}

/// The index an appended section gets. Equal to the section count while the
/// numbering is contiguous.
fn next_index(sections: &[Section]) -> usize {
    sections.last().map_or(0, |s| s.index + 1)
}

/// The first position whose section does not carry the matching index.
fn first_gap(sections: &[Section]) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .find(|(position, s)| s.index != *position)
        .map(|(position, _)| position)
}
