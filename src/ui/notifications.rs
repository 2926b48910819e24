//! Non-blocking notifications for brief feedback messages.
//!
//! Notifications are plain data with a lifetime; a renderer decides how to
//! show them. Errors from every screen land here instead of interrupting the
//! user.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "✓",
            NotificationLevel::Info => "ℹ",
            NotificationLevel::Warning => "⚠",
            NotificationLevel::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
    pub lifetime: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self::at(message, level, Instant::now())
    }

    pub fn at(message: impl Into<String>, level: NotificationLevel, created_at: Instant) -> Self {
        Self {
            message: message.into(),
            level,
            created_at,
            lifetime: DEFAULT_LIFETIME,
        }
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.lifetime
    }
}

/// Queue of active notifications.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        log::debug!("Notification ({:?}): {}", notification.level, notification.message);
        self.notifications.push(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationLevel::Info));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationLevel::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationLevel::Error));
    }

    /// Drop notifications whose lifetime has passed.
    pub fn cleanup_at(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    pub fn cleanup(&mut self) {
        self.cleanup_at(Instant::now());
    }

    pub fn active(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Hand every pending notification to the caller.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}
