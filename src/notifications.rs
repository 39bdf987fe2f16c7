//! Notifications
//!
//! Transient, user-visible messages ("toasts") raised by cart and checkout operations.

use std::{cell::RefCell, rc::Rc};

use mockall::automock;
use serde::Serialize;
use tracing::{info, warn};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information
    Info,

    /// Something the shopper asked for succeeded
    Success,

    /// Something was removed or went away
    Destructive,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short headline
    pub title: String,

    /// Body text
    pub message: String,

    /// Presentation severity
    pub severity: Severity,
}

impl Notification {
    /// Create a notification.
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    /// Create an [`Severity::Info`] notification.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Info)
    }

    /// Create a [`Severity::Success`] notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Success)
    }

    /// Create a [`Severity::Destructive`] notification.
    pub fn destructive(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Destructive)
    }
}

/// Displays notifications. Fire and forget.
#[automock]
pub trait Notifier {
    /// Show a notification.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            message,
            severity,
        } = notification;

        match severity {
            Severity::Destructive => warn!(%title, "{message}"),
            Severity::Info | Severity::Success => info!(%title, ?severity, "{message}"),
        }
    }
}

/// Records notifications in memory, oldest first.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<Notification>>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of every recorded notification.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }

    /// Remove and return every recorded notification.
    pub fn take(&self) -> Vec<Notification> {
        self.entries.take()
    }

    /// Number of recorded notifications.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_in_order() {
        let log = NotificationLog::new();

        log.notify(Notification::info("One", "first"));
        log.notify(Notification::destructive("Two", "second"));

        let titles: Vec<String> = log.entries().into_iter().map(|n| n.title).collect();

        assert_eq!(titles, vec!["One", "Two"]);
        assert_eq!(
            log.last().map(|n| n.severity),
            Some(Severity::Destructive)
        );
    }

    #[test]
    fn take_drains_the_log() {
        let log = NotificationLog::new();

        log.notify(Notification::success("Added", "ok"));

        assert_eq!(log.take().len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn shared_references_forward_to_the_log() {
        let log = Rc::new(NotificationLog::new());
        let by_ref = &*log;

        by_ref.notify(Notification::info("Ref", ""));
        Rc::clone(&log).notify(Notification::info("Rc", ""));

        assert_eq!(log.len(), 2);
    }
}
