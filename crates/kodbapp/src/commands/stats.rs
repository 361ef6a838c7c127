use crate::commands::{CmdMessage, CmdResult, ProjectPaths};
use crate::error::{KodbError, Result};
use crate::pipeline::Counter;
use crate::store::{SectionBackend, SectionStore};
use std::path::PathBuf;

/// Counts the words of the document, sections taken in order.
pub fn run<B: SectionBackend, C: Counter>(
    store: &SectionStore<B>,
    paths: &ProjectPaths,
    counter: &C,
) -> Result<CmdResult> {
    let sections = store.list_sections()?;
    if sections.is_empty() {
        return Err(KodbError::EmptyDocument);
    }

    let files: Vec<PathBuf> = sections.iter().map(|s| s.path.clone()).collect();
    let stats = counter.count(paths.root(), &files)?;

    let mut result = CmdResult::default().with_listed_sections(sections);
    result.add_message(CmdMessage::info(format!(
        "{} words, {} characters",
        stats.words, stats.characters
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::WordStats;
    use crate::store::MemBackend;
    use std::cell::RefCell;
    use std::path::Path;

    /// Reports fixed counts and remembers the files it was given.
    #[derive(Default)]
    struct FixedCounter {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl Counter for FixedCounter {
        fn count(&self, _root: &Path, sections: &[PathBuf]) -> Result<WordStats> {
            *self.seen.borrow_mut() = sections.to_vec();
            Ok(WordStats {
                words: 1200,
                characters: 7000,
            })
        }
    }

    fn store(files: &[(&str, &str)]) -> SectionStore<MemBackend> {
        SectionStore::with_backend(MemBackend::with_files(files.iter().copied()))
    }

    #[test]
    fn counts_sections_in_document_order() {
        let store = store(&[("01_b.md", ""), ("00_a.md", "")]);
        let counter = FixedCounter::default();

        let result = run(&store, &ProjectPaths::new("/p"), &counter).unwrap();

        let seen = counter.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].ends_with("00_a.md"));
        assert!(seen[1].ends_with("01_b.md"));
        assert_eq!(result.messages[0].content, "1200 words, 7000 characters");
    }

    #[test]
    fn empty_document_is_not_counted() {
        let counter = FixedCounter::default();
        assert!(matches!(
            run(&store(&[]), &ProjectPaths::new("/p"), &counter),
            Err(KodbError::EmptyDocument)
        ));
        assert!(counter.seen.borrow().is_empty());
    }
}
