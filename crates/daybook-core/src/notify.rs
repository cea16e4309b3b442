//! Transient user-visible notifications.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default time a notification stays visible.
pub const DEFAULT_NOTIFICATION_MS: u64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub shown_at: DateTime<Utc>,
}

/// Single-slot notifier: a new notification replaces the visible one.
#[derive(Debug, Clone)]
pub struct Notifier {
    duration: Duration,
    current: Option<Notification>,
    history: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_MS)
    }
}

impl Notifier {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration: Duration::milliseconds(i64::from(
                u32::try_from(duration_ms).unwrap_or(u32::MAX),
            )),
            current: None,
            history: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NotificationLevel::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NotificationLevel::Error);
    }

    pub fn show(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.show_at(message, level, Utc::now());
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        level: NotificationLevel,
        shown_at: DateTime<Utc>,
    ) {
        let notification = Notification {
            message: message.into(),
            level,
            shown_at,
        };
        tracing::debug!(level = ?notification.level, "{}", notification.message);
        self.history.push(notification.clone());
        self.current = Some(notification);
    }

    /// The visible notification at `now`, if it has not expired.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| now < notification.shown_at + self.duration)
    }

    /// The most recent notification regardless of expiry.
    pub fn latest(&self) -> Option<&Notification> {
        self.history.last()
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_expires_after_duration() {
        let mut notifier = Notifier::new(3_000);
        let start = Utc::now();
        notifier.show_at("Goals saved!", NotificationLevel::Success, start);

        assert!(notifier.current(start).is_some());
        assert!(notifier
            .current(start + Duration::milliseconds(2_999))
            .is_some());
        assert!(notifier
            .current(start + Duration::milliseconds(3_000))
            .is_none());
        assert_eq!(notifier.latest().unwrap().message, "Goals saved!");
    }

    #[test]
    fn new_notification_replaces_visible_one() {
        let mut notifier = Notifier::default();
        notifier.success("Block removed");
        notifier.error("Failed to save entry");

        let now = Utc::now();
        let current = notifier.current(now).unwrap();
        assert_eq!(current.message, "Failed to save entry");
        assert_eq!(current.level, NotificationLevel::Error);
        assert_eq!(notifier.history().len(), 2);
    }

    #[test]
    fn dismiss_hides_without_forgetting() {
        let mut notifier = Notifier::default();
        notifier.success("Recording started");
        notifier.dismiss();
        assert!(notifier.current(Utc::now()).is_none());
        assert_eq!(notifier.history().len(), 1);
    }
}
