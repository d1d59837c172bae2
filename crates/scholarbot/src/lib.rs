//! Core state for the ScholarBot student client: scholarship discovery, application tracking,
//! notifications, the assistant chat, and the profile page.

pub mod analytics;
pub mod applications;
pub mod auth;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod discovery;
pub mod error;
pub mod notice;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod telemetry;

pub use error::{AppError, ValidationError};
pub use session::{ScholarSession, SessionError};
