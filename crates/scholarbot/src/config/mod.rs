use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::chat::DEFAULT_MAX_ATTACHMENT_BYTES;

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a ScholarBot session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub catalog: CatalogConfig,
    pub chat: ChatConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let scholarships_csv = optional_path("SCHOLARBOT_CATALOG_CSV");
        let applications_csv = optional_path("SCHOLARBOT_APPLICATIONS_CSV");

        let reply_delay_ms = number_or("SCHOLARBOT_CHAT_DELAY_MS", 1500)?;
        let reply_jitter_ms = number_or("SCHOLARBOT_CHAT_JITTER_MS", 1000)?;
        let max_attachment_bytes =
            number_or("SCHOLARBOT_MAX_ATTACHMENT_BYTES", DEFAULT_MAX_ATTACHMENT_BYTES)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            catalog: CatalogConfig {
                scholarships_csv,
                applications_csv,
            },
            chat: ChatConfig {
                reply_delay: Duration::from_millis(reply_delay_ms),
                reply_jitter: Duration::from_millis(reply_jitter_ms),
                max_attachment_bytes,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::Development,
            catalog: CatalogConfig::default(),
            chat: ChatConfig::default(),
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

fn optional_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn number_or(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

/// Where the catalog is read from. Both paths unset means the built-in mock catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub scholarships_csv: Option<PathBuf>,
    pub applications_csv: Option<PathBuf>,
}

/// Timing and limits for the simulated assistant chat.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub reply_delay: Duration,
    pub reply_jitter: Duration,
    pub max_attachment_bytes: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(1500),
            reply_jitter: Duration::from_millis(1000),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
