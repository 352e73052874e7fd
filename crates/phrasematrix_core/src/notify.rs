//! User-facing notification sink.
//!
//! # Responsibility
//! - Define the write-only contract the core uses to surface feedback.
//! - Provide small sinks for logging and tests.
//!
//! # Invariants
//! - Core never reads notifier state and never depends on delivery success.

use log::{info, warn};
use std::cell::RefCell;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Default,
    Destructive,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
        }
    }
}

/// One toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Fire-and-forget feedback channel.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification),
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Collects every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.received.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.received.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Notification> {
        self.received.borrow().last().cloned()
    }

    /// Drains recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.borrow_mut())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}

/// Forwards notifications to the `log` facade.
///
/// Only title and severity are logged; message bodies stay out of log files.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let line = event_line(&notification);
        match notification.severity {
            Severity::Default => info!("{line}"),
            Severity::Destructive => warn!("{line}"),
        }
    }
}

fn event_line(notification: &Notification) -> String {
    let status = match notification.severity {
        Severity::Default => "ok",
        Severity::Destructive => "error",
    };
    format!(
        "event=notify module=notify status={status} severity={} title={:?}",
        notification.severity.as_str(),
        notification.title
    )
}

#[cfg(test)]
mod tests {
    use super::{event_line, LogNotifier, Notification, Notifier, RecordingNotifier, Severity};
    use std::cell::Cell;

    #[test]
    fn recording_notifier_keeps_order_and_drains() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::new("a", "first", Severity::Default));
        notifier.notify(Notification::new("b", "second", Severity::Destructive));

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.last().unwrap().message, "second");

        let drained = notifier.take();
        assert_eq!(drained[0].title, "a");
        assert!(notifier.is_empty());
    }

    #[test]
    fn closures_act_as_notifiers() {
        let calls = Cell::new(0);
        let sink = |_: Notification| calls.set(calls.get() + 1);
        sink.notify(Notification::new("t", "m", Severity::Default));
        (&sink).notify(Notification::new("t", "m", Severity::Default));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn log_lines_carry_title_and_severity_but_not_the_body() {
        let saved = Notification::new("Guardado", "Frase secreta añadida", Severity::Default);
        assert_eq!(
            event_line(&saved),
            "event=notify module=notify status=ok severity=default title=\"Guardado\""
        );

        let failed = Notification::new("Error", "disk full", Severity::Destructive);
        let line = event_line(&failed);
        assert!(line.contains("status=error severity=destructive"));
        assert!(!line.contains("disk full"));

        // No logger is installed in unit tests; delivery must still be silent.
        LogNotifier.notify(failed);
    }
}
