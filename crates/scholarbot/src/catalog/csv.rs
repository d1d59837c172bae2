use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::info;

use super::{Catalog, CatalogError, CatalogSource};
use crate::applications::{ApplicationId, ApplicationRecord, ApplicationStatus};
use crate::discovery::{ScholarshipId, ScholarshipRecord};

/// Loads scholarships, and optionally applications, from CSV exports.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    scholarships: PathBuf,
    applications: Option<PathBuf>,
}

impl CsvCatalog {
    pub fn new(scholarships: impl Into<PathBuf>, applications: Option<PathBuf>) -> Self {
        Self {
            scholarships: scholarships.into(),
            applications,
        }
    }

    pub fn from_readers<S: Read, A: Read>(
        scholarships: S,
        applications: Option<A>,
    ) -> Result<Catalog, CatalogError> {
        let scholarships = parse_scholarships(scholarships)?;
        let applications = match applications {
            Some(reader) => parse_applications(reader, &scholarships)?,
            None => Vec::new(),
        };

        Ok(Catalog {
            scholarships,
            applications,
            ..Catalog::default()
        })
    }
}

impl CatalogSource for CsvCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let scholarships = open(&self.scholarships)?;
        let applications = self.applications.as_deref().map(open).transpose()?;
        let catalog = Self::from_readers(scholarships, applications)?;
        info!(
            scholarships = catalog.scholarships.len(),
            applications = catalog.applications.len(),
            path = %self.scholarships.display(),
            "catalog imported"
        );
        Ok(catalog)
    }
}

fn open(path: &Path) -> Result<std::fs::File, CatalogError> {
    Ok(std::fs::File::open(path)?)
}

fn reader<R: Read>(source: R) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(source)
}

/// Data rows are numbered from 1; the header is not counted.
fn parse_scholarships<R: Read>(source: R) -> Result<Vec<ScholarshipRecord>, CatalogError> {
    let mut records = Vec::new();
    for (index, row) in reader(source).deserialize::<ScholarshipRow>().enumerate() {
        let row = row?;
        let deadline = parse_date(index + 1, &row.deadline)?;
        records.push(ScholarshipRecord {
            id: ScholarshipId(row.id),
            title: row.title,
            provider: row.provider,
            amount: row.amount,
            deadline,
            description: row.description,
            requirements: split_requirements(&row.requirements),
            featured: row.featured,
            category: row.category,
            location: row.location,
            kind: row.kind,
        });
    }
    Ok(records)
}

fn parse_applications<R: Read>(
    source: R,
    scholarships: &[ScholarshipRecord],
) -> Result<Vec<ApplicationRecord>, CatalogError> {
    let mut records = Vec::new();
    for (index, row) in reader(source).deserialize::<ApplicationRow>().enumerate() {
        let row = row?;
        let line = index + 1;

        let scholarship = scholarships
            .iter()
            .find(|candidate| candidate.id.0 == row.scholarship_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownScholarship {
                row: line,
                scholarship_id: row.scholarship_id.clone(),
            })?;
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|_| CatalogError::InvalidStatus {
                row: line,
                value: row.status.clone(),
            })?;
        let applied_at = start_of_day(parse_date(line, &row.applied_date)?);
        let status_at = match row.status_date.as_deref() {
            Some(raw) => start_of_day(parse_date(line, raw)?),
            None => applied_at,
        };
        if status_at < applied_at {
            return Err(CatalogError::StatusBeforeApplied { row: line });
        }

        records.push(ApplicationRecord {
            id: ApplicationId(row.id),
            scholarship,
            status,
            applied_at,
            status_at,
            notes: row.notes,
        });
    }
    Ok(records)
}

fn split_requirements(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(row: usize, raw: &str) -> Result<NaiveDate, CatalogError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CatalogError::InvalidDate {
        row,
        value: raw.to_string(),
    })
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[derive(Debug, Deserialize)]
struct ScholarshipRow {
    id: String,
    title: String,
    provider: String,
    amount: String,
    deadline: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    requirements: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    featured: bool,
    category: String,
    #[serde(default)]
    location: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    id: String,
    scholarship_id: String,
    status: String,
    applied_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status_date: Option<String>,
    #[serde(default)]
    notes: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" => Ok(false),
        "true" | "yes" | "1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, found '{other}'"
        ))),
    }
}
