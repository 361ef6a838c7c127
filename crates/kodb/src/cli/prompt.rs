//! Interactive prompts.
//!
//! Prompts write to stderr and read lines from stdin, so piping `kodb list`
//! stays clean and answers can be scripted (`echo y | kodb remove 2`).
//! The loops are generic over reader and writer so they can be tested with
//! in-memory buffers.

use super::styles::{INDEX, MUTED};
use kodbapp::model::Section;
use std::io::{self, BufRead, Write};

/// Outcome of a disambiguation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Picked(Section),
    /// The user answered `q`.
    Cancelled,
    /// Input ended before a valid answer.
    NoAnswer,
}

/// Asks which of several sections matching `token` was meant.
///
/// Invalid input re-prompts.
pub fn choose_section<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    token: &str,
    candidates: &[Section],
) -> io::Result<Choice> {
    writeln!(output, "Found {} sections matching \"{}\":", candidates.len(), token)?;
    for (i, section) in candidates.iter().enumerate() {
        writeln!(
            output,
            "  {} {}",
            INDEX.apply_to(format!("[{}]", i + 1)),
            MUTED.apply_to(section.path.display())
        )?;
    }

    loop {
        write!(output, "Select one [1-{}] or q to cancel: ", candidates.len())?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            writeln!(output)?;
            return Ok(Choice::NoAnswer);
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(Choice::Cancelled);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=candidates.len()).contains(&n) => {
                return Ok(Choice::Picked(candidates[n - 1].clone()))
            }
            _ => writeln!(output, "Invalid selection \"{}\"", answer)?,
        }
    }
}

/// Yes/no question defaulting to no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;
    let answer = read_answer(input)?.unwrap_or_default().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// One trimmed line, or `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn candidates() -> Vec<Section> {
        vec![
            Section::new(1, "results", PathBuf::from("src/01_results.md")),
            Section::new(3, "results", PathBuf::from("src/03_results.md")),
        ]
    }

    fn choose(answers: &str) -> (Choice, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let chosen = choose_section(&mut input, &mut output, "results", &candidates()).unwrap();
        (chosen, String::from_utf8(output).unwrap())
    }

    #[test]
    fn picks_by_number() {
        let (chosen, _) = choose("2\n");
        assert_eq!(chosen, Choice::Picked(candidates()[1].clone()));
    }

    #[test]
    fn retries_until_valid() {
        let (chosen, output) = choose("0\nfoo\n3\n1\n");
        assert_eq!(chosen, Choice::Picked(candidates()[0].clone()));
        assert_eq!(output.matches("Invalid selection").count(), 3);
    }

    #[test]
    fn q_cancels() {
        assert_eq!(choose("Q\n").0, Choice::Cancelled);
    }

    #[test]
    fn end_of_input_is_not_a_cancel() {
        assert_eq!(choose("bad\n").0, Choice::NoAnswer);
        assert_eq!(choose("").0, Choice::NoAnswer);
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut output = Vec::new();
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("\n", false), ("n\n", false), ("", false)] {
            let mut input = Cursor::new(answer.as_bytes().to_vec());
            assert_eq!(confirm(&mut input, &mut output, "Sure?").unwrap(), expected);
        }
    }
}
