//! Configuration module for the sweep job.
//!
//! The job is configured via a TOML file (or the legacy JSON layout), with
//! support for environment variable interpolation using `${VAR_NAME}` syntax.
//!
//! # Example
//!
//! ```toml
//! dry_run = false
//!
//! [limits]
//! request_interval_ms = 350
//!
//! [[databases]]
//! name = "Inbox"
//! database_id = "${INBOX_DATABASE_ID}"
//! filters = { property = "Status", status = { equals = "Done" } }
//! ```

mod databases;
mod limits;
mod notion;
mod observability;

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

pub use databases::*;
pub use limits::*;
pub use notion::*;
pub use observability::*;
use serde::{Deserialize, Serialize};

/// Root configuration for a sweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Global dry-run flag. Individual databases may override it.
    #[serde(default)]
    pub dry_run: bool,

    /// Databases to sweep, processed in order.
    pub databases: Vec<DatabaseConfig>,

    /// Notion API connection settings.
    #[serde(default)]
    pub notion: NotionConfig,

    /// Request pacing and rate-limit backoff.
    #[serde(default)]
    pub limits: RateLimitConfig,

    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// On-disk configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    /// The legacy `{"databases": [...]}` layout.
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Anything other than `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl SweepConfig {
    /// Load configuration from a file.
    ///
    /// Environment variables in the format `${VAR_NAME}` are expanded.
    /// Missing variables cause an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(e, path.to_path_buf()))?;

        Self::parse(&contents, ConfigFormat::from_path(path))
    }

    /// Parse configuration from a string in the given format.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: SweepConfig = match format {
            ConfigFormat::Toml => {
                let expanded = expand_env_vars(contents, true)?;
                toml::from_str(&expanded)?
            }
            ConfigFormat::Json => {
                // `#` is ordinary text in JSON, so every reference is expanded
                let expanded = expand_env_vars(contents, false)?;
                serde_json::from_str(&expanded)?
            }
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration for consistency and completeness.
    fn validate(&self) -> Result<(), ConfigError> {
        for (index, database) in self.databases.iter().enumerate() {
            database
                .validate()
                .map_err(|msg| ConfigError::Validation(format!("databases[{index}]: {msg}")))?;
        }

        self.notion.validate().map_err(ConfigError::Validation)?;
        self.limits.validate().map_err(ConfigError::Validation)?;

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid JSON in config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

static ENV_VAR_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Expand `${VAR_NAME}` references from the process environment.
///
/// With `skip_comments`, references after a `#` on the same line are left as-is.
fn expand_env_vars(input: &str, skip_comments: bool) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        let comment_pos = if skip_comments { line.find('#') } else { None };

        let mut last_end = 0;

        for cap in ENV_VAR_PATTERN.captures_iter(line) {
            let Some(whole) = cap.get(0) else {
                continue;
            };

            if let Some(pos) = comment_pos
                && whole.start() >= pos
            {
                continue;
            }

            result.push_str(&line[last_end..whole.start()]);

            let var_name = &cap[1];
            let value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
            result.push_str(&value);

            last_end = whole.end();
        }

        result.push_str(&line[last_end..]);
        result.push('\n');
    }

    // Remove trailing newline if input didn't have one
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    Ok(result)
}
