//! Error types for the submission judge

use std::path::PathBuf;
use thiserror::Error;

use crate::rubric::Category;

/// Result type alias using the judge's Error type
pub type Result<T> = std::result::Result<T, JudgeError>;

/// Errors that stop a submission (or the whole run) from being judged.
///
/// Failed clones, setup commands and launch attempts are not errors; they
/// are recorded in the submission's score and notes.
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("{} not found", .0.display())]
    SubmissionsNotFound(PathBuf),

    #[error("Clone failed: {0}")]
    Clone(String),

    #[error("Unknown sub-criterion '{criterion}' for {category}")]
    UnknownCriterion {
        category: Category,
        criterion: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
