// src/ui/terminal.rs

use crate::model::Task;
use crate::pipeline::{SolveOutcome, available_document};
use crate::session::{Notice, NoticeKind};
use crate::ui::Presenter;
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::path::Path;

/// Line-oriented front end on any reader/writer pair.
pub struct TerminalPresenter<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl TerminalPresenter<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // Output is best effort; a closed terminal ends the session on the next read.
    fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn prompt(&mut self, label: &str) -> Option<String> {
        let _ = write!(self.out, "{}", label.bold());
        let _ = self.out.flush();

        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn render_tasks(&mut self, tasks: &[Task]) {
        self.line("");
        self.line("📋 Your Tasks".bold().underline());

        if tasks.is_empty() {
            self.line(
                "You don't have any tasks yet. Add one with `add` to get started!".blue(),
            );
            return;
        }

        for (i, task) in tasks.iter().enumerate() {
            let n = i + 1;
            self.line(format!(
                "{} {}   🕒 Due: {}",
                format!("[{n}]").dimmed(),
                task.title.bold(),
                task.deadline
            ));
            for desc_line in task.description.lines() {
                self.line(format!("    {desc_line}"));
            }

            if !task.completed() {
                self.line(format!("    🤖 solve {n}").cyan());
            } else if let Some(path) = available_document(task) {
                self.line(format!("    📥 download {n}  ({})", path.display()).green());
            }
            self.line("---".dimmed());
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        let text = match notice.kind {
            NoticeKind::Success => format!("✅ {}", notice.message).green(),
            NoticeKind::Info => format!("ℹ️  {}", notice.message).blue(),
            NoticeKind::Error => format!("❌ {}", notice.message).red(),
        };
        self.line(text);
    }

    fn show_progress(&mut self, message: &str) {
        self.line(format!("📡 {message}").yellow());
    }

    fn offer_download(&mut self, path: &Path, mime: &str) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.line(format!("📥 {name} [{mime}] -> {}", path.display()).green());
    }

    fn show_essay_info(&mut self, outcome: &SolveOutcome) {
        self.line("📚 Essay Info".bold());
        self.line(format!("Word Count: {}", outcome.word_count));
        self.line("Sections:");
        for section in &outcome.sections {
            self.line(format!("- {section}"));
        }
    }

    fn show_help(&mut self) {
        self.line("📝 Smart To-Do List with Gemini AI".green().bold());
        self.line("Commands:");
        self.line("  add                  add a new task");
        self.line("  list                 show your tasks");
        self.line("  solve <n>            generate an answer PDF for task n");
        self.line("  download <n> [dir]   copy task n's PDF into dir (default: .)");
        self.line("  help                 show this help");
        self.line("  quit                 leave (tasks are not saved)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn presenter(input: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        TerminalPresenter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn prompt_reads_lines_until_eof() {
        let mut p = presenter("first\r\nsecond\n");
        assert_eq!(p.prompt("> ").as_deref(), Some("first"));
        assert_eq!(p.prompt("> ").as_deref(), Some("second"));
        assert_eq!(p.prompt("> "), None);
    }

    #[test]
    fn empty_list_shows_hint() {
        let mut p = presenter("");
        p.render_tasks(&[]);
        assert!(output(p).contains("You don't have any tasks yet"));
    }

    #[test]
    fn tasks_render_with_actions() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let pending = Task::new("Photosynthesis", "Explain\nbriefly", date);
        let mut gone = Task::new("Old", "", date);
        gone.complete(PathBuf::from("/definitely/not/here.pdf"));

        let mut p = presenter("");
        p.render_tasks(&[pending, gone]);
        let out = output(p);

        assert!(out.contains("[1] Photosynthesis   🕒 Due: 2026-10-20"));
        assert!(out.contains("    Explain\n    briefly"));
        assert!(out.contains("solve 1"));
        assert!(!out.contains("solve 2"));
        assert!(!out.contains("download 2"));
    }

    #[test]
    fn essay_info_lists_sections() {
        let mut p = presenter("");
        p.show_essay_info(&SolveOutcome {
            document: PathBuf::from("pdfs/a.pdf"),
            word_count: 321,
            sections: vec!["Intro".into(), "Light reactions".into()],
        });
        let out = output(p);
        assert!(out.contains("Word Count: 321"));
        assert!(out.contains("- Intro\n- Light reactions"));
    }
}
