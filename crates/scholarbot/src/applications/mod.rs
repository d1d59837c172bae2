//! Application lifecycle tracking for the signed-in user.

pub mod domain;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationStatusView, UnknownStatus,
};
pub use tracker::{ApplicationTracker, StatusCounts, TrackerError, TransitionRejection};
