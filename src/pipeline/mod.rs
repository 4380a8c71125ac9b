// src/pipeline/mod.rs

use crate::document::DocumentWriter;
use crate::error::{Result, TodoError};
use crate::generation::{GenerationRequest, Generator};
use crate::sanitize::latin1_lossy;
use crate::session::{NoticeKind, SessionStore};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use tracing::{info, warn};

pub mod retrieve;
pub use retrieve::{available_document, fetch_document};

/// What the presenter gets back after a task is solved. The essay itself
/// is not kept; only its reported word count and section headings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveOutcome {
    pub document: PathBuf,
    pub word_count: u64,
    pub sections: Vec<String>,
}

/// Generate -> sanitize -> write -> mark completed.
pub struct Pipeline<G: Generator> {
    generator: G,
    writer: DocumentWriter,
}

impl<G: Generator> Pipeline<G> {
    pub fn new(generator: G, writer: DocumentWriter) -> Self {
        Self { generator, writer }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn solve(&self, session: &mut SessionStore, index: usize) -> Result<SolveOutcome> {
        self.solve_at(session, index, Local::now().naive_local())
    }

    /// Solves the task at `index`, stamping the file name with `at`.
    ///
    /// The task is only touched once every step has succeeded. On failure
    /// an error notice is posted and the task stays pending.
    pub fn solve_at(
        &self,
        session: &mut SessionStore,
        index: usize,
        at: NaiveDateTime,
    ) -> Result<SolveOutcome> {
        match self.run(session, index, at) {
            Ok(outcome) => {
                info!(task = index + 1, path = %outcome.document.display(), "task completed");
                session.notify(NoticeKind::Success, "Answer generated & PDF created!");
                session.request_input_reset();
                Ok(outcome)
            }
            Err(e) => {
                warn!(task = index + 1, error = %e, retryable = e.is_retryable(), "solve failed");
                session.notify(NoticeKind::Error, &format!("Error: {e}"));
                Err(e)
            }
        }
    }

    fn run(
        &self,
        session: &mut SessionStore,
        index: usize,
        at: NaiveDateTime,
    ) -> Result<SolveOutcome> {
        let task = session
            .task(index)
            .ok_or(TodoError::UnknownTask(index + 1))?;
        if task.completed() {
            return Err(TodoError::AlreadyCompleted(index + 1));
        }

        let request = GenerationRequest::for_task(self.generator.model(), task);
        info!(
            task = index + 1,
            generator = self.generator.name(),
            model = %request.model,
            "requesting answer"
        );
        let essay = self.generator.generate(&request)?;

        let text = latin1_lossy(&essay.content);
        let document = self.writer.write(&task.title, &text, at)?;

        let mut updated = task.clone();
        updated.complete(document.clone());
        session.update_task(index, updated)?;

        Ok(SolveOutcome {
            document,
            word_count: essay.word_count,
            sections: essay.sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Essay, Task};
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};

    struct Scripted {
        reply: std::result::Result<Essay, String>,
        prompts: RefCell<Vec<String>>,
        calls: Cell<usize>,
    }

    impl Scripted {
        fn ok(content: &str) -> Self {
            Self {
                reply: Ok(Essay {
                    title: "t".into(),
                    content: content.into(),
                    word_count: 42,
                    sections: vec!["Intro".into(), "End".into()],
                }),
                prompts: RefCell::new(Vec::new()),
                calls: Cell::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.into()),
                prompts: RefCell::new(Vec::new()),
                calls: Cell::new(0),
            }
        }
    }

    impl Generator for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        fn generate(&self, request: &GenerationRequest) -> Result<Essay> {
            self.calls.set(self.calls.get() + 1);
            self.prompts.borrow_mut().push(request.prompt.clone());
            self.reply.clone().map_err(TodoError::Generation)
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn session_with(title: &str) -> SessionStore {
        let mut session = SessionStore::new();
        session.append_task(Task::new(
            title,
            "Explain in 3 paragraphs",
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        ));
        session
    }

    #[test]
    fn success_completes_task_and_raises_reset() {
        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            Scripted::ok("Plain answer."),
            DocumentWriter::new(tmp.path()).unwrap(),
        );
        let mut session = session_with("Photosynthesis");

        let outcome = pipeline.solve_at(&mut session, 0, at()).unwrap();

        let task = &session.list_tasks()[0];
        assert!(task.completed());
        assert_eq!(task.document(), Some(outcome.document.as_path()));
        assert!(outcome.document.exists());
        assert_eq!(outcome.word_count, 42);
        assert_eq!(outcome.sections, vec!["Intro", "End"]);
        assert_eq!(
            pipeline.generator().prompts.borrow()[0],
            "Topic: Photosynthesis\n\nInstructions: Explain in 3 paragraphs"
        );
        assert!(session.consume_reset_flag());
        assert_eq!(session.drain_notices()[0].kind, NoticeKind::Success);
    }

    #[test]
    fn generation_failure_leaves_task_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            Scripted::failing("connection reset"),
            DocumentWriter::new(tmp.path()).unwrap(),
        );
        let mut session = session_with("Photosynthesis");
        let before = session.list_tasks()[0].clone();

        let err = pipeline.solve_at(&mut session, 0, at()).unwrap_err();

        assert!(matches!(err, TodoError::Generation(_)));
        assert_eq!(session.list_tasks()[0], before);
        assert!(!session.consume_reset_flag());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
        let notices = session.drain_notices();
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert!(notices[0].message.contains("connection reset"));
    }

    #[test]
    fn completed_task_is_not_regenerated() {
        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            Scripted::ok("Answer"),
            DocumentWriter::new(tmp.path()).unwrap(),
        );
        let mut session = session_with("Once");
        pipeline.solve_at(&mut session, 0, at()).unwrap();

        let err = pipeline.solve_at(&mut session, 0, at()).unwrap_err();
        assert!(matches!(err, TodoError::AlreadyCompleted(1)));
        assert_eq!(pipeline.generator().calls.get(), 1);
    }

    #[test]
    fn unknown_index_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            Scripted::ok("Answer"),
            DocumentWriter::new(tmp.path()).unwrap(),
        );
        let mut session = SessionStore::new();
        assert!(matches!(
            pipeline.solve_at(&mut session, 3, at()),
            Err(TodoError::UnknownTask(4))
        ));
        assert_eq!(pipeline.generator().calls.get(), 0);
    }
}
