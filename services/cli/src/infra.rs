use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use scholarbot::auth::MockAuthenticator;
use scholarbot::catalog::{CsvCatalog, MockCatalog};
use scholarbot::config::AppConfig;
use scholarbot::error::AppError;
use scholarbot::notice::{Notice, NoticeVariant};
use scholarbot::{ScholarSession, SessionError};
use serde::Serialize;
use tracing::info;

pub(crate) type Session = ScholarSession<MockAuthenticator>;

/// Sign in against the configured catalog: CSV when a path is set, the seed data otherwise.
pub(crate) fn open_session(
    config: &AppConfig,
    user: &str,
    secret: &str,
) -> Result<Session, AppError> {
    let session = match &config.catalog.scholarships_csv {
        Some(path) => {
            info!(path = %path.display(), "using CSV catalog");
            let source = CsvCatalog::new(path, config.catalog.applications_csv.clone());
            ScholarSession::init(&source, MockAuthenticator, user, secret, config)?
        }
        None => ScholarSession::init(&MockCatalog, MockAuthenticator, user, secret, config)?,
    };
    Ok(session)
}

/// Name, size and guessed MIME type of a local file offered as a chat attachment.
#[derive(Debug, Clone)]
pub(crate) struct LocalFile {
    pub(crate) name: String,
    pub(crate) size_bytes: u64,
    pub(crate) mime_type: String,
}

pub(crate) fn inspect_file(path: &Path) -> Result<LocalFile, AppError> {
    let size_bytes = std::fs::metadata(path)?.len();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(LocalFile {
        name,
        size_bytes,
        mime_type,
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Switches every command between human-readable text and JSON.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    pub(crate) json: bool,
}

impl Output {
    pub(crate) fn emit<T, F>(&self, value: &T, render: F) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T),
    {
        if self.json {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value).map_err(std::io::Error::from)?;
            writeln!(stdout)?;
        } else {
            render(value);
        }
        Ok(())
    }

    pub(crate) fn notice(&self, notice: &Notice) -> Result<(), AppError> {
        self.emit(notice, |notice| {
            let marker = match notice.variant {
                NoticeVariant::Default => "*",
                NoticeVariant::Destructive => "!",
            };
            println!("{marker} {}: {}", notice.title, notice.description);
        })
    }

    /// Non-fatal failures are reported as notices and the command carries on.
    pub(crate) fn recover<T>(&self, result: Result<T, SessionError>) -> Result<Option<T>, AppError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.notice(&Notice::from(&err))?;
                Ok(None)
            }
        }
    }
}
