use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KodbError {
    #[error("Could not find a kodb project (no kodb.yaml within {levels} levels above {})", .start.display())]
    ProjectNotFound { start: PathBuf, levels: usize },

    #[error("Could not find any sections matching \"{0}\"")]
    SectionNotFound(String),

    #[error("Found {} sections matching \"{token}\"", .candidates.len())]
    AmbiguousSection {
        token: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Malformed section file name \"{0}\": expected <index>_<name>.md")]
    MalformedSection(String),

    #[error("Cannot parse section position \"{0}\": it must be a non-negative integer")]
    PositionParse(String),

    #[error("Invalid section name \"{0}\"")]
    InvalidName(String),

    #[error("{stage} failed: {detail}")]
    PipelineFailure { stage: String, detail: String },

    #[error("There are no sections to build")]
    EmptyDocument,

    #[error("A kodb project already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("Project is locked by another kodb process (remove {} if it is stale)", .0.display())]
    Locked(PathBuf),

    #[error("Cannot rename {from} to {to}: target already exists")]
    RenameConflict { from: String, to: String },

    #[error("{0}")]
    Editor(String),

    #[error("Could not read project metadata: {0}")]
    Metadata(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KodbError>;
