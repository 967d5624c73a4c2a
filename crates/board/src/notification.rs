//! Transient status messages.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// How a notification is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The operation worked.
    Success,
    /// The operation failed.
    Error,
    /// Neutral information.
    Info,
}

/// A message shown for a limited time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Styling level.
    pub level: Level,
    /// Text to show.
    pub message: String,
}

impl Notification {
    /// A success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// An error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// An informational message.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Notifications waiting to expire, newest last.
///
/// Time is passed in explicitly so expiry can be tested without sleeping.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    ttl: Duration,
    entries: VecDeque<(Instant, Notification)>,
}

impl NotificationQueue {
    /// At most this many notifications are kept; older ones are dropped.
    pub const CAPACITY: usize = 5;

    /// Creates an empty queue whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: VecDeque::new(),
        }
    }

    /// Adds a notification posted at `now`.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((now, notification));
    }

    /// Drops every entry older than the time-to-live.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|(posted, _)| now.saturating_duration_since(*posted) < ttl);
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back().map(|(_, n)| n)
    }

    /// Returns `true` if nothing is showing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
