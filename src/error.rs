// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// The model call failed or returned something that does not fit the essay schema.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render document: {0}")]
    Render(String),

    /// A completed task's document is gone from disk.
    #[error("Document not found: {0}")]
    MissingArtifact(PathBuf),

    // Task numbers below are 1-based, as shown to the user.
    #[error("No task with number {0}")]
    UnknownTask(usize),

    #[error("Task {0} already has an answer")]
    AlreadyCompleted(usize),

    #[error("Task {0} has no answer yet")]
    NotCompleted(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TodoError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Failures that leave the task pending and can be retried by the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TodoError::Generation(_) | TodoError::Filesystem { .. } | TodoError::Render(_)
        )
    }
}
