use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::discovery::{Queryable, ScholarshipRecord};

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of an application. `Pending` is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}' (expected pending, approved, or rejected)")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownStatus(raw.to_string())),
        }
    }
}

/// A scholarship the user applied to, with its current lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    /// Read-only copy of the catalog entry applied to.
    pub scholarship: ScholarshipRecord,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    /// Time of the last status transition; never earlier than `applied_at`.
    pub status_at: DateTime<Utc>,
    pub notes: String,
}

impl ApplicationRecord {
    pub fn pending(
        id: ApplicationId,
        scholarship: ScholarshipRecord,
        applied_at: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            scholarship,
            status: ApplicationStatus::Pending,
            applied_at,
            status_at: applied_at,
            notes: notes.into(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            scholarship_title: self.scholarship.title.clone(),
            provider: self.scholarship.provider.clone(),
            amount: self.scholarship.amount.clone(),
            status: self.status.label(),
            applied_on: self.applied_at.date_naive().to_string(),
            status_on: self.status_at.date_naive().to_string(),
            notes: self.notes.clone(),
        }
    }
}

impl Queryable for ApplicationRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.scholarship.title.as_str(),
            self.scholarship.provider.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.scholarship.category)
    }

    fn kind(&self) -> Option<&str> {
        Some(&self.scholarship.kind)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.label())
    }
}

/// Flattened application row for listings and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub scholarship_title: String,
    pub provider: String,
    pub amount: String,
    pub status: &'static str,
    pub applied_on: String,
    pub status_on: String,
    pub notes: String,
}
