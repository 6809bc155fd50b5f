//! Capped, append-only notification log.
//!
//! Replaces the surrounding app's shared mutable notification array with an
//! owned log: newest first, bounded retention, and a read accessor instead of
//! direct list mutation.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub severity: NotificationSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Newest-first notification log with capped retention.
#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    retention: usize,
}

impl NotificationLog {
    /// Retention of zero is clamped to one so the log always holds the most
    /// recent entry.
    pub fn new(retention: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            retention: retention.max(1),
        }
    }

    /// Record a notification with an explicit timestamp; oldest entries fall
    /// off once retention is exceeded. Returns the assigned id.
    pub fn record_at(
        &mut self,
        severity: NotificationSeverity,
        message: impl Into<String>,
        details: Option<String>,
        at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push_front(Notification {
            id,
            severity,
            message: message.into(),
            details,
            timestamp: at,
        });
        self.entries.truncate(self.retention);
        id
    }

    /// Record a notification stamped with the current time.
    pub fn record(
        &mut self,
        severity: NotificationSeverity,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Uuid {
        self.record_at(severity, message, details, Utc::now())
    }

    /// Entries, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(crate::config::AnalyticsSettings::default().notification_retention)
    }
}
