// src/ui/app.rs

use crate::document::DOCUMENT_MIME;
use crate::error::TodoError;
use crate::generation::Generator;
use crate::model::Task;
use crate::pipeline::{Pipeline, fetch_document};
use crate::session::{NoticeKind, SessionStore};
use crate::ui::{Command, FormDraft, Presenter, parse_command, parse_deadline};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::debug;

/// The interaction handler. Owns the session and runs one action at a time.
pub struct App<G: Generator, P: Presenter> {
    pipeline: Pipeline<G>,
    presenter: P,
    session: SessionStore,
    draft: FormDraft,
    download_dir: PathBuf,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<G: Generator, P: Presenter> App<G, P> {
    pub fn new(pipeline: Pipeline<G>, presenter: P) -> Self {
        Self {
            pipeline,
            presenter,
            session: SessionStore::new(),
            draft: FormDraft::new(local_today()),
            download_dir: PathBuf::from("."),
            today: local_today,
        }
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self.draft = FormDraft::new(today());
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Reads and handles commands until `quit` or end of input.
    pub fn run(&mut self) {
        self.presenter.show_help();
        self.presenter.render_tasks(self.session.list_tasks());

        loop {
            self.begin_cycle();
            let Some(line) = self.presenter.prompt("todo> ") else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command),
                Err(e) => self.session.notify(NoticeKind::Error, &e),
            }
            self.flush_notices();
        }
    }

    /// Start of a render cycle: honour a pending input reset.
    fn begin_cycle(&mut self) {
        if self.session.consume_reset_flag() {
            debug!("clearing new-task inputs");
            self.draft.reset((self.today)());
        }
    }

    fn flush_notices(&mut self) {
        for notice in self.session.drain_notices() {
            self.presenter.show_notice(&notice);
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Add => self.add_task(),
            Command::List => self.presenter.render_tasks(self.session.list_tasks()),
            Command::Solve(n) => {
                if let Some(index) = self.index_of(n) {
                    self.solve(index);
                }
            }
            Command::Download(n, dir) => {
                let Some(index) = self.index_of(n) else {
                    return;
                };
                let dir = dir.unwrap_or_else(|| self.download_dir.clone());
                if let Ok(copy) = fetch_document(&mut self.session, index, &dir) {
                    self.presenter.offer_download(&copy, DOCUMENT_MIME);
                }
            }
            Command::Help => self.presenter.show_help(),
            Command::Quit => {}
        }
    }

    fn index_of(&mut self, n: usize) -> Option<usize> {
        let index = n.checked_sub(1);
        if index.is_none() {
            let e = TodoError::UnknownTask(n);
            self.session.notify(NoticeKind::Error, &e.to_string());
        }
        index
    }

    fn field(&mut self, label: &str, current: &str) -> Option<String> {
        let label = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        let answer = self.presenter.prompt(&label)?;
        let answer = answer.trim_end_matches(['\r', '\n']);
        Some(if answer.is_empty() {
            current.to_string()
        } else {
            answer.to_string()
        })
    }

    fn add_task(&mut self) {
        let current = self.draft.clone();
        let Some(title) = self.field("Task title", &current.title) else {
            return;
        };
        self.draft.title = title;
        let Some(description) = self.field("Description", &current.description) else {
            return;
        };
        self.draft.description = description;
        let deadline_text = current.deadline.format("%Y-%m-%d").to_string();
        let Some(deadline) = self.field("Deadline (YYYY-MM-DD)", &deadline_text) else {
            return;
        };

        match parse_deadline(&deadline) {
            Ok(deadline) => {
                self.draft.deadline = deadline;
                let task = Task::new(&self.draft.title, &self.draft.description, deadline);
                debug!(title = %task.title, deadline = %task.deadline, "task added");
                self.session.append_task(task);
                self.session.notify(NoticeKind::Success, "Task added successfully!");
                self.presenter.render_tasks(self.session.list_tasks());
            }
            Err(e) => self.session.notify(NoticeKind::Error, &e),
        }
    }

    fn solve(&mut self, index: usize) {
        self.presenter
            .show_progress(&format!("Sending to {}...", self.pipeline.generator().name()));
        if let Ok(outcome) = self.pipeline.solve(&mut self.session, index) {
            self.presenter.offer_download(&outcome.document, DOCUMENT_MIME);
            self.presenter.show_essay_info(&outcome);
        }
    }
}
