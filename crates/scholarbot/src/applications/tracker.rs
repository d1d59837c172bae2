use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use crate::discovery::{filter, QueryParams};

/// Why a withdrawal or status change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRejection {
    NotFound,
    NotPending(ApplicationStatus),
    IllegalTarget(ApplicationStatus),
}

impl fmt::Display for TransitionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionRejection::NotFound => f.write_str("no such application"),
            TransitionRejection::NotPending(current) => {
                write!(f, "application is already {current}")
            }
            TransitionRejection::IllegalTarget(target) => {
                write!(f, "cannot move an application to {target}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("invalid transition for application {id}: {reason}")]
    InvalidTransition {
        id: ApplicationId,
        reason: TransitionRejection,
    },
}

/// Per-status tallies. `approved + pending + rejected == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

/// Owns the signed-in user's applications, in the order they were loaded.
#[derive(Debug, Clone, Default)]
pub struct ApplicationTracker {
    records: Vec<ApplicationRecord>,
}

impl ApplicationTracker {
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &ApplicationId) -> Option<&ApplicationRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn query(&self, params: &QueryParams) -> Vec<&ApplicationRecord> {
        filter(&self.records, params)
    }

    pub fn counts(&self) -> StatusCounts {
        self.records
            .iter()
            .fold(StatusCounts::default(), |mut counts, record| {
                counts.total += 1;
                match record.status {
                    ApplicationStatus::Pending => counts.pending += 1,
                    ApplicationStatus::Approved => counts.approved += 1,
                    ApplicationStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Approved share of all applications as a percentage; `0.0` for an empty tracker.
    pub fn success_rate(&self) -> f64 {
        let counts = self.counts();
        if counts.total == 0 {
            return 0.0;
        }
        counts.approved as f64 * 100.0 / counts.total as f64
    }

    /// Remove a pending application. Decided applications stay on record.
    pub fn withdraw(&mut self, id: &ApplicationId) -> Result<ApplicationRecord, TrackerError> {
        let position = self.position(id)?;
        let status = self.records[position].status;
        if status != ApplicationStatus::Pending {
            return Err(rejected(id, TransitionRejection::NotPending(status)));
        }

        let removed = self.records.remove(position);
        info!(application = %id, "application withdrawn");
        Ok(removed)
    }

    pub fn set_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
        notes: impl Into<String>,
    ) -> Result<&ApplicationRecord, TrackerError> {
        self.set_status_at(id, status, notes, Utc::now())
    }

    /// Apply a transition stamped at `at`. The stamp is clamped to `applied_at`.
    pub fn set_status_at(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
        notes: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<&ApplicationRecord, TrackerError> {
        let position = self.position(id)?;
        let current = self.records[position].status;
        if current != ApplicationStatus::Pending {
            return Err(rejected(id, TransitionRejection::NotPending(current)));
        }
        if !current.can_transition_to(status) {
            return Err(rejected(id, TransitionRejection::IllegalTarget(status)));
        }

        let record = &mut self.records[position];
        record.status = status;
        record.status_at = at.max(record.applied_at);
        record.notes = notes.into();
        info!(application = %id, status = status.label(), "application status updated");
        Ok(&*record)
    }

    fn position(&self, id: &ApplicationId) -> Result<usize, TrackerError> {
        self.records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| rejected(id, TransitionRejection::NotFound))
    }
}

fn rejected(id: &ApplicationId, reason: TransitionRejection) -> TrackerError {
    warn!(application = %id, %reason, "application transition refused");
    TrackerError::InvalidTransition {
        id: id.clone(),
        reason,
    }
}
