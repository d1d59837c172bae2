use crate::applications::TrackerError;
use crate::auth::{AuthError, AuthFormError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::profile::ProfileError;
use crate::session::SessionError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Rejected user input. Surfaced as a notice; never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("message is empty")]
    EmptyMessage,
    #[error("attachment is {size_bytes} bytes; the limit is {limit_bytes} bytes")]
    AttachmentTooLarge { size_bytes: u64, limit_bytes: u64 },
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Catalog(CatalogError),
    Session(SessionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Session(err) => write!(f, "session error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Session(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<TrackerError> for AppError {
    fn from(value: TrackerError) -> Self {
        Self::Session(SessionError::Tracker(value))
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Session(SessionError::Validation(value))
    }
}

impl From<ProfileError> for AppError {
    fn from(value: ProfileError) -> Self {
        Self::Session(SessionError::Profile(value))
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Session(SessionError::Auth(value))
    }
}

impl From<AuthFormError> for AppError {
    fn from(value: AuthFormError) -> Self {
        match value {
            AuthFormError::Validation(err) => err.into(),
            AuthFormError::Auth(err) => err.into(),
        }
    }
}
