// src/ui/mod.rs

use crate::model::Task;
use crate::pipeline::SolveOutcome;
use crate::session::Notice;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub mod app;
pub mod terminal;

pub use app::App;
pub use terminal::TerminalPresenter;

/// Everything the interaction loop needs from a front end.
pub trait Presenter {
    /// Shows `label` and reads one line. `None` means input is closed.
    fn prompt(&mut self, label: &str) -> Option<String>;
    fn render_tasks(&mut self, tasks: &[Task]);
    fn show_notice(&mut self, notice: &Notice);
    fn show_progress(&mut self, message: &str);
    fn offer_download(&mut self, path: &Path, mime: &str);
    fn show_essay_info(&mut self, outcome: &SolveOutcome);
    fn show_help(&mut self);
}

/// Values of the new-task form. They survive between actions until an
/// input reset clears them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
}

impl FormDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            deadline: today,
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    List,
    /// 1-based task number.
    Solve(usize),
    Download(usize, Option<PathBuf>),
    Help,
    Quit,
}

fn task_number(arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.ok_or("missing task number")?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{raw}' is not a task number")),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".into());
    };

    let command = match verb.to_lowercase().as_str() {
        "add" | "a" => Command::Add,
        "list" | "ls" | "l" => Command::List,
        "solve" | "s" => Command::Solve(task_number(words.next())?),
        "download" | "d" => {
            let n = task_number(words.next())?;
            Command::Download(n, words.next().map(PathBuf::from))
        }
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };

    match words.next() {
        Some(extra) => Err(format!("unexpected argument '{extra}'")),
        None => Ok(command),
    }
}

/// Accepts `YYYY-MM-DD`.
pub fn parse_deadline(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD)", raw.trim()))
}
