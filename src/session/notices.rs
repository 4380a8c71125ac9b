// src/session/notices.rs

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// A channel of transient messages for the presentation layer.
pub trait NoticeLog {
    fn post(&mut self, kind: NoticeKind, message: &str);
    fn drain(&mut self) -> Vec<Notice>;
}

/// Notices are shown once and then dropped.
#[derive(Default, Debug)]
pub struct InMemoryNotices {
    pub entries: Vec<Notice>,
}

impl InMemoryNotices {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl NoticeLog for InMemoryNotices {
    fn post(&mut self, kind: NoticeKind, message: &str) {
        self.entries.push(Notice {
            kind,
            message: message.to_string(),
        });
    }

    fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.entries)
    }
}
