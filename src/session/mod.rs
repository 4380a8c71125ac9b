// src/session/mod.rs

use crate::error::{Result, TodoError};
use crate::model::Task;

pub mod notices;
pub use notices::{InMemoryNotices, Notice, NoticeKind, NoticeLog};

/// Everything that lives for one session: the tasks, the one-shot input
/// reset flag and pending notices. Owned by the interaction loop.
#[derive(Default)]
pub struct SessionStore {
    tasks: Vec<Task>,
    clear_inputs: bool,
    notices: InMemoryNotices,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            clear_inputs: false,
            notices: InMemoryNotices::new(),
        }
    }

    /// Tasks in insertion order.
    pub fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Appends and returns the new task's index.
    pub fn append_task(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    /// Replaces the record at `index` in place; order is untouched.
    pub fn update_task(&mut self, index: usize, task: Task) -> Result<()> {
        let slot = self
            .tasks
            .get_mut(index)
            .ok_or(TodoError::UnknownTask(index + 1))?;
        *slot = task;
        Ok(())
    }

    pub fn request_input_reset(&mut self) {
        self.clear_inputs = true;
    }

    /// Returns the flag and lowers it.
    pub fn consume_reset_flag(&mut self) -> bool {
        std::mem::take(&mut self.clear_inputs)
    }

    pub fn notify(&mut self, kind: NoticeKind, message: &str) {
        self.notices.post(kind, message);
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}
