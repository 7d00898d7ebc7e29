use std::cell::RefCell;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Injected side-effect surface for user-visible feedback. Operations
/// never print or prompt directly; they go through this trait so the CLI,
/// the TUI, and tests each plug in their own presentation.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);

    /// Destructive operations ask before acting. Shells that confirm
    /// upstream (e.g. a modal) answer yes here.
    fn confirm(&self, message: &str) -> bool {
        let _ = message;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warn,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: String,
}

pub fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Plain stdout/stderr notifier for the CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutNotifier {
    /// Answer given to `confirm`; the CLI is non-interactive and passes
    /// `--yes` style intent through here.
    pub assume_yes: bool,
}

impl Notifier for StdoutNotifier {
    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if !self.assume_yes {
            eprintln!("{} (re-run with --yes to proceed)", message);
        }
        self.assume_yes
    }
}

/// Collects notices for the TUI status area. Interior-mutable so the
/// shell can hold it alongside the stores it mutates.
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: RefCell<Vec<Notice>>,
}

impl NoticeLog {
    const KEEP: usize = 100;

    pub fn push(&self, level: NoticeLevel, message: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.push(Notice {
            level,
            message: message.to_string(),
            at: now_ts(),
        });
        let len = entries.len();
        if len > Self::KEEP {
            entries.drain(..len - Self::KEEP);
        }
    }

    pub fn latest(&self) -> Option<Notice> {
        self.entries.borrow().last().cloned()
    }

    pub fn recent(&self, n: usize) -> Vec<Notice> {
        let entries = self.entries.borrow();
        entries.iter().rev().take(n).cloned().collect()
    }
}

impl Notifier for NoticeLog {
    fn success(&self, message: &str) {
        self.push(NoticeLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(NoticeLevel::Error, message);
    }

    fn warn(&self, message: &str) {
        self.push(NoticeLevel::Warn, message);
    }

    // The TUI confirms through its pending-action modal before invoking
    // the operation, so the default yes applies.
}
