//! User-facing notifications.
//!
//! A side channel: the core pushes (title, message, severity) triples and
//! never reads them back. The TUI shows them as expiring toasts; the CLI
//! prints them.

use chrono::{DateTime, Duration, Local};
use log::{info, warn};
use std::collections::VecDeque;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            created_at: Local::now(),
        }
    }

    /// Submission rejected before reaching the backend
    pub fn missing_fields() -> Self {
        Self::new(
            "Missing fields",
            "Please fill in all required fields",
            Severity::Destructive,
        )
    }

    /// Backend accepted a submission
    pub fn submitted() -> Self {
        Self::new(
            "Tool submitted!",
            "Your tool has been added to the community directory.",
            Severity::Default,
        )
    }

    /// Backend rejected a submission
    pub fn submission_failed() -> Self {
        Self::new(
            "Submission failed",
            "There was an error submitting your tool. Please try again.",
            Severity::Destructive,
        )
    }

    /// Tool source failed to deliver
    pub fn load_failed() -> Self {
        Self::new(
            "Could not load tools",
            "The directory could not be refreshed. Please try again.",
            Severity::Destructive,
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Receives notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Default => info!("{}: {}", notification.title, notification.message),
            Severity::Destructive => warn!("{}: {}", notification.title, notification.message),
        }
    }
}

/// Expiring toast queue for the TUI. Newest last.
#[derive(Debug)]
pub struct Toasts {
    queue: VecDeque<Notification>,
    ttl: Duration,
    capacity: usize,
}

impl Toasts {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl: i64::try_from(ttl_ms)
                .ok()
                .and_then(Duration::try_milliseconds)
                .unwrap_or(Duration::MAX),
            capacity: 3,
        }
    }

    /// Drop toasts older than the TTL as of `now`.
    pub fn prune(&mut self, now: DateTime<Local>) {
        let ttl = self.ttl;
        self.queue.retain(|n| now - n.created_at < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(4000)
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        LogNotifier.notify(notification.clone());
        self.queue.push_back(notification);
        while self.queue.len() > self.capacity {
            self.queue.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_notifications() {
        let n = Notification::missing_fields();
        assert_eq!(n.title, "Missing fields");
        assert!(n.is_destructive());

        let n = Notification::submitted();
        assert_eq!(n.title, "Tool submitted!");
        assert!(!n.is_destructive());

        assert!(Notification::submission_failed().is_destructive());
        assert!(Notification::load_failed().is_destructive());
    }

    #[test]
    fn test_vec_notifier_collects() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(Notification::submitted());
        sink.notify(Notification::missing_fields());
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].title, "Missing fields");
    }

    #[test]
    fn test_toasts_expire() {
        let mut toasts = Toasts::new(1000);
        toasts.notify(Notification::submitted());
        assert_eq!(toasts.len(), 1);

        toasts.prune(Local::now());
        assert_eq!(toasts.len(), 1);

        toasts.prune(Local::now() + Duration::milliseconds(1500));
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let mut toasts = Toasts::new(u64::MAX);
        toasts.notify(Notification::submitted());
        toasts.prune(Local::now() + Duration::days(365));
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_toasts_capacity() {
        let mut toasts = Toasts::default();
        for i in 0..5 {
            toasts.notify(Notification::new(format!("t{}", i), "m", Severity::Default));
        }
        assert_eq!(toasts.len(), 3);
        let titles: Vec<_> = toasts.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["t2", "t3", "t4"]);
    }
}
