use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for catalog scholarships.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScholarshipId(pub String);

impl fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scholarship as published by the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipRecord {
    pub id: ScholarshipId,
    pub title: String,
    pub provider: String,
    /// Display string such as `$10,000`; not interpreted numerically.
    pub amount: String,
    pub deadline: NaiveDate,
    pub description: String,
    pub requirements: Vec<String>,
    pub featured: bool,
    pub category: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Featured scholarships in catalog order, capped at `limit`.
pub fn featured(records: &[ScholarshipRecord], limit: usize) -> Vec<&ScholarshipRecord> {
    records
        .iter()
        .filter(|record| record.featured)
        .take(limit)
        .collect()
}
