//! Catalog sources: the built-in seed data and CSV imports.

mod csv;
mod mock;

pub use self::csv::CsvCatalog;
pub use self::mock::MockCatalog;

use crate::applications::ApplicationRecord;
use crate::chat::ChatMessage;
use crate::discovery::ScholarshipRecord;
use crate::notifications::NotificationRecord;

/// Everything a session starts from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub scholarships: Vec<ScholarshipRecord>,
    pub applications: Vec<ApplicationRecord>,
    pub notifications: Vec<NotificationRecord>,
    pub chat_history: Vec<ChatMessage>,
}

/// Supplies the initial records for a session.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: unknown application status '{value}'")]
    InvalidStatus { row: usize, value: String },
    #[error("row {row}: no scholarship with id '{scholarship_id}'")]
    UnknownScholarship { row: usize, scholarship_id: String },
    #[error("row {row}: status_date precedes applied_date")]
    StatusBeforeApplied { row: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn errors_name_the_offending_row() {
        let err = CatalogError::UnknownScholarship {
            row: 4,
            scholarship_id: "s9".to_string(),
        };
        assert_eq!(err.to_string(), "row 4: no scholarship with id 's9'");
        assert!(err.source().is_none());
    }

    #[test]
    fn io_failures_keep_their_source() {
        let err = CatalogError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "scholarships.csv",
        ));
        assert!(err.to_string().starts_with("failed to read catalog"));
        assert!(err.source().is_some());
    }
}
