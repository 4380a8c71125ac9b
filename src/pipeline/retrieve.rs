// src/pipeline/retrieve.rs

use crate::error::{Result, TodoError};
use crate::model::Task;
use crate::session::{NoticeKind, SessionStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The task's document, but only if it is still on disk.
pub fn available_document(task: &Task) -> Option<&Path> {
    task.document().filter(|path| path.is_file())
}

/// Copies the document of task `index` into `dest_dir` under its own file
/// name and returns the copy's path.
///
/// A document that vanished from disk is reported as `MissingArtifact`
/// with an info notice; the task itself stays completed.
pub fn fetch_document(session: &mut SessionStore, index: usize, dest_dir: &Path) -> Result<PathBuf> {
    match copy_out(session, index, dest_dir) {
        Ok(copy) => {
            info!(task = index + 1, dest = %copy.display(), "document delivered");
            session.notify(
                NoticeKind::Success,
                &format!("Downloaded {}", copy.display()),
            );
            Ok(copy)
        }
        Err(e @ TodoError::MissingArtifact(_)) => {
            warn!(task = index + 1, error = %e, "document missing");
            session.notify(
                NoticeKind::Info,
                "PDF file might have been moved or deleted.",
            );
            Err(e)
        }
        Err(e) => {
            session.notify(NoticeKind::Error, &format!("Error accessing PDF: {e}"));
            Err(e)
        }
    }
}

fn copy_out(session: &SessionStore, index: usize, dest_dir: &Path) -> Result<PathBuf> {
    let task = session
        .task(index)
        .ok_or(TodoError::UnknownTask(index + 1))?;
    let source = task.document().ok_or(TodoError::NotCompleted(index + 1))?;

    if !source.is_file() {
        return Err(TodoError::MissingArtifact(source.to_path_buf()));
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| TodoError::MissingArtifact(source.to_path_buf()))?;

    fs::create_dir_all(dest_dir).map_err(|e| TodoError::filesystem(dest_dir, e))?;
    let dest = dest_dir.join(file_name);
    if dest != source {
        fs::copy(source, &dest).map_err(|e| TodoError::filesystem(&dest, e))?;
    }
    Ok(dest)
}
