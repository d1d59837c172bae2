use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// In-memory notification list. Insertion order is kept; `read` only ever flips to true.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    records: Vec<NotificationRecord>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new(records: Vec<NotificationRecord>) -> Self {
        let next_id = records.len() as u64 + 1;
        Self { records, next_id }
    }

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|record| !record.read).count()
    }

    /// Append a new unread notification and return its id.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> NotificationId {
        let id = self.allocate_id();
        self.records.push(NotificationRecord {
            id: id.clone(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp,
            read: false,
        });
        id
    }

    /// Returns whether a notification with that id exists.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.records.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for record in &mut self.records {
            record.read = true;
        }
    }

    pub fn delete(&mut self, id: &NotificationId) -> Option<NotificationRecord> {
        let position = self.records.iter().position(|record| &record.id == id)?;
        Some(self.records.remove(position))
    }

    pub fn clear_all(&mut self) {
        self.records.clear();
    }

    fn allocate_id(&mut self) -> NotificationId {
        loop {
            let candidate = NotificationId(self.next_id.to_string());
            self.next_id += 1;
            if !self.records.iter().any(|record| record.id == candidate) {
                return candidate;
            }
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Coarse relative age used by the notification list.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    format!("{}d ago", hours / 24)
}
