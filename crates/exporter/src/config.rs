//! Export configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EXPORT_DATABASE_URL` - `PostgreSQL` connection string for the host catalog
//!   (falls back to `DATABASE_URL`)
//! - `EXPORT_LOOKUP_BATCH_SIZE` - Products per parent lookup query (default: 500)
//! - `EXPORT_DIRECT_LINK_FALLBACK` - Export unmatched composites under their own
//!   ID (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::num::NonZeroUsize;

use secrecy::SecretString;
use thiserror::Error;

#[allow(clippy::unwrap_used)] // 500 is non-zero
const DEFAULT_LOOKUP_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(500).unwrap();

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Relation resolution settings
    pub relations: RelationSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Relation export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSettings {
    /// Maximum number of product IDs per parent lookup.
    pub lookup_batch_size: NonZeroUsize,
    /// Export composites without a parent match under their bare ID.
    ///
    /// When disabled they are left out of the export and logged.
    pub direct_link_fallback: bool,
}

impl Default for RelationSettings {
    fn default() -> Self {
        Self {
            lookup_batch_size: DEFAULT_LOOKUP_BATCH_SIZE,
            direct_link_fallback: true,
        }
    }
}

impl ExportConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("EXPORT_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from);

        let lookup_batch_size = match lookup("EXPORT_LOOKUP_BATCH_SIZE") {
            Some(value) => parse_batch_size("EXPORT_LOOKUP_BATCH_SIZE", &value)?,
            None => DEFAULT_LOOKUP_BATCH_SIZE,
        };
        let direct_link_fallback = match lookup("EXPORT_DIRECT_LINK_FALLBACK") {
            Some(value) => parse_bool("EXPORT_DIRECT_LINK_FALLBACK", &value)?,
            None => true,
        };

        Ok(Self {
            database_url,
            relations: RelationSettings {
                lookup_batch_size,
                direct_link_fallback,
            },
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }

    /// Returns the database URL, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if no database URL was configured.
    pub fn require_database_url(&self) -> Result<&SecretString, ConfigError> {
        self.database_url
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("EXPORT_DATABASE_URL".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_batch_size(key: &str, value: &str) -> Result<NonZeroUsize, ConfigError> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
