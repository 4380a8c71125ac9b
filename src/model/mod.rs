// src/model/mod.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolution state of a task. The document path only exists once the task is completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Completed { document: PathBuf },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub description: String,
    /// Stored as `YYYY-MM-DD`.
    pub deadline: String,
    state: TaskState,
}

impl Task {
    pub fn new(title: &str, description: &str, deadline: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            deadline: deadline.format("%Y-%m-%d").to_string(),
            state: TaskState::Pending,
        }
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    pub fn completed(&self) -> bool {
        matches!(self.state, TaskState::Completed { .. })
    }

    pub fn document(&self) -> Option<&Path> {
        match &self.state {
            TaskState::Completed { document } => Some(document),
            TaskState::Pending => None,
        }
    }

    /// Pending -> Completed. Returns false (and changes nothing) if already completed.
    pub fn complete(&mut self, document: PathBuf) -> bool {
        if self.completed() {
            return false;
        }
        self.state = TaskState::Completed { document };
        true
    }

    /// Prompt sent to the model, fields taken verbatim.
    pub fn prompt(&self) -> String {
        format!("Topic: {}\n\nInstructions: {}", self.title, self.description)
    }
}

/// Structured answer requested from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Essay {
    pub title: String,
    pub content: String,
    pub word_count: u64,
    pub sections: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task::new(
            "Photosynthesis",
            "Explain in 3 paragraphs",
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        )
    }

    #[test]
    fn new_task_is_pending_without_document() {
        let t = task();
        assert!(!t.completed());
        assert!(t.document().is_none());
        assert_eq!(t.deadline, "2026-10-20");
    }

    #[test]
    fn complete_sets_document_once() {
        let mut t = task();
        assert!(t.complete(PathBuf::from("pdfs/a.pdf")));
        assert!(t.completed());
        assert_eq!(t.document(), Some(Path::new("pdfs/a.pdf")));

        assert!(!t.complete(PathBuf::from("pdfs/b.pdf")));
        assert_eq!(t.document(), Some(Path::new("pdfs/a.pdf")));
    }

    #[test]
    fn prompt_is_composed_verbatim() {
        let t = Task::new("  Odd <title>", "line1\nline2", NaiveDate::MIN);
        assert_eq!(t.prompt(), "Topic:   Odd <title>\n\nInstructions: line1\nline2");
    }
}
