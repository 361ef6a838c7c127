//! # Build Pipeline
//!
//! Building a document is two external programs run back to back:
//!
//! 1. The converter (pandoc) turns the ordered Markdown sections into one
//!    standalone TeX file.
//! 2. The engine (tectonic) typesets that file into a PDF.
//!
//! kodb does not look inside either stage. Its only job is to hand the sections
//! over in document order together with the metadata and bibliography paths.
//! The [`Pipeline`] trait is the seam: [`PandocTectonic`] shells out, tests
//! substitute a recorder.
//!
//! Word counts reuse the converter: [`PandocWordCount`] runs it over the same
//! ordered sections with a Lua filter that prints the counts instead of
//! producing output. [`Counter`] is its seam.

use crate::config::{data_dir, KodbConfig};
use crate::error::{KodbError, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything a pipeline consumes, sections in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildInput {
    pub sections: Vec<PathBuf>,
    pub metadata: Option<PathBuf>,
    pub bibliographies: Vec<PathBuf>,
    pub csl: Option<PathBuf>,
}

pub trait Pipeline {
    /// Compiles the document inside `root` and returns the artifact path.
    fn compile(&self, root: &Path, input: &BuildInput) -> Result<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandocTectonic {
    pub converter: String,
    pub engine: String,
    pub filters: Vec<String>,
    pub output: String,
}

impl PandocTectonic {
    pub fn from_config(config: &KodbConfig) -> Self {
        Self {
            converter: config.converter.clone(),
            engine: config.engine.clone(),
            filters: config.filters(),
            output: config.output.clone(),
        }
    }

    fn tex_file(&self) -> String {
        format!("{}.tex", self.output)
    }

    /// Arguments for the converter stage.
    pub fn converter_args(&self, root: &Path, input: &BuildInput) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--standalone".into()];
        args.extend(input.sections.iter().map(|p| p.clone().into_os_string()));
        args.push("-o".into());
        args.push(root.join(self.tex_file()).into_os_string());

        if let Some(metadata) = &input.metadata {
            args.push(flag_with_path("--metadata-file=", metadata));
        }
        if !input.bibliographies.is_empty() {
            args.push("--citeproc".into());
        }
        // Given on the command line, one flag per file replaces the whole
        // list from the metadata, so every entry is passed
        for bibliography in &input.bibliographies {
            args.push(flag_with_path("--bibliography=", bibliography));
        }
        if let Some(csl) = &input.csl {
            args.push(flag_with_path("--csl=", csl));
        }
        for filter in &self.filters {
            args.push("--filter".into());
            args.push(filter.into());
        }
        args
    }
}

fn flag_with_path(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

impl Pipeline for PandocTectonic {
    fn compile(&self, root: &Path, input: &BuildInput) -> Result<PathBuf> {
        if input.sections.is_empty() {
            return Err(KodbError::EmptyDocument);
        }

        let mut converter = Command::new(&self.converter);
        converter.args(self.converter_args(root, input)).current_dir(root);
        run_stage(&self.converter, converter)?;

        let tex = root.join(self.tex_file());
        let mut engine = Command::new(&self.engine);
        engine.arg(self.tex_file()).current_dir(root);
        let typeset = run_stage(&self.engine, engine);

        if let Err(e) = fs::remove_file(&tex) {
            tracing::warn!("could not remove {}: {}", tex.display(), e);
        }
        typeset?;

        Ok(root.join(format!("{}.pdf", self.output)))
    }
}

/// Runs one external program, returning its stdout.
fn run_stage(stage: &str, mut command: Command) -> Result<String> {
    tracing::debug!("running {:?}", command);
    let output = command.output().map_err(|e| KodbError::PipelineFailure {
        stage: stage.to_string(),
        detail: format!("could not start: {}", e),
    })?;

    if output.status.success() {
        tracing::info!("{} finished", stage);
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = match stderr.trim() {
        "" => format!("exited with {}", output.status),
        text => text.to_string(),
    };
    Err(KodbError::PipelineFailure {
        stage: stage.to_string(),
        detail,
    })
}

pub const WORDCOUNT_FILTER_NAME: &str = "wordcount.lua";

/// Walks the document body, prints `words <n>` and `characters <n>`, then
/// exits so the converter writes nothing.
const WORDCOUNT_FILTER: &str = r#"local words = 0
local characters = 0

local function count(text)
  characters = characters + (utf8.len(text) or #text)
  -- Punctuation on its own is not a word
  if text:match("%P") then
    words = words + 1
  end
end

local function count_code(el)
  for word in el.text:gmatch("%S+") do
    count(word)
  end
end

local counter = {
  Str = function(el) count(el.text) end,
  Code = count_code,
  CodeBlock = count_code,
}

function Pandoc(doc)
  pandoc.walk_block(pandoc.Div(doc.blocks), counter)
  print("words " .. words)
  print("characters " .. characters)
  os.exit(0)
end
"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    pub words: usize,
    pub characters: usize,
}

impl WordStats {
    /// Reads the `words <n>` and `characters <n>` lines the filter prints.
    /// Other lines are ignored. Both counts must be present.
    pub fn parse(output: &str) -> Option<Self> {
        let (mut words, mut characters) = (None, None);
        for line in output.lines() {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next().map(str::parse::<usize>)) {
                (Some("words"), Some(Ok(n))) => words = Some(n),
                (Some("characters"), Some(Ok(n))) => characters = Some(n),
                _ => {}
            }
        }
        Some(Self {
            words: words?,
            characters: characters?,
        })
    }
}

pub trait Counter {
    /// Counts the words of the given sections, in order, inside `root`.
    fn count(&self, root: &Path, sections: &[PathBuf]) -> Result<WordStats>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandocWordCount {
    pub converter: String,
    /// Where the Lua filter is written before the converter runs.
    pub filter_dir: PathBuf,
}

impl PandocWordCount {
    /// Keeps the filter in the user data directory, or under `<root>/.kodb`
    /// when there is none.
    pub fn from_config(config: &KodbConfig, root: &Path) -> Self {
        Self {
            converter: config.converter.clone(),
            filter_dir: data_dir().unwrap_or_else(|| root.join(".kodb")),
        }
    }

    /// Writes the filter unless an identical copy is already in place.
    pub fn ensure_filter(&self) -> Result<PathBuf> {
        let path = self.filter_dir.join(WORDCOUNT_FILTER_NAME);
        if fs::read_to_string(&path).ok().as_deref() != Some(WORDCOUNT_FILTER) {
            fs::create_dir_all(&self.filter_dir)?;
            fs::write(&path, WORDCOUNT_FILTER)?;
            tracing::debug!("wrote {}", path.display());
        }
        Ok(path)
    }

    pub fn counter_args(&self, sections: &[PathBuf], filter: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = sections.iter().map(|p| p.clone().into_os_string()).collect();
        args.push("-L".into());
        args.push(filter.as_os_str().to_os_string());
        args
    }
}

impl Counter for PandocWordCount {
    fn count(&self, root: &Path, sections: &[PathBuf]) -> Result<WordStats> {
        if sections.is_empty() {
            return Err(KodbError::EmptyDocument);
        }
        let filter = self.ensure_filter()?;

        let mut converter = Command::new(&self.converter);
        converter
            .args(self.counter_args(sections, &filter))
            .current_dir(root);
        let stdout = run_stage(&self.converter, converter)?;

        WordStats::parse(&stdout).ok_or_else(|| KodbError::PipelineFailure {
            stage: self.converter.clone(),
            detail: format!("unexpected word count output: {:?}", stdout.trim()),
        })
    }
}

/// Looks a program up on `PATH`.
pub fn find_program(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
