//! Configuration management for the contact verifier.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured if present. Command-line flags are applied on top of the
//! loaded configuration by the binary (see `cli.rs`).

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the contact verifier.
#[derive(Debug, Clone)]
pub struct Config {
    /// CRM instance base URL (e.g. `https://example.my.salesforce.com`)
    pub crm_instance_url: String,

    /// Pre-established bearer token for the CRM
    pub crm_access_token: String,

    /// CRM REST API version segment (default: "v59.0")
    pub crm_api_version: String,

    /// WebDriver endpoint used for headless searches
    pub webdriver_url: String,

    /// Maximum number of contacts per run (default: 25)
    pub contact_limit: usize,

    /// Contacts verified within this many months are skipped (default: 6)
    pub staleness_months: u32,

    /// Compute results without writing them back (default: false)
    pub dry_run: bool,

    /// Debug-level logging (default: false)
    pub verbose: bool,

    /// Check email domains for MX records in data-quality mode (default: true)
    pub validate_email: bool,

    /// Minimum spacing between outbound operations in ms (default: 1000)
    pub min_request_interval_ms: u64,

    /// Results written concurrently per chunk (default: 10)
    pub batch_size: usize,

    /// Courtesy delay between contacts in the search path, in ms (default: 3000)
    pub contact_delay_ms: u64,

    /// Lower bound of the randomized pre-search delay in ms (default: 1000)
    pub search_delay_min_ms: u64,

    /// Upper bound of the randomized pre-search delay in ms (default: 3000)
    pub search_delay_max_ms: u64,

    /// Bound on a single search navigation in seconds (default: 15)
    pub navigation_timeout_secs: u64,

    /// CRM HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Directory for report artifacts (default: "reports")
    pub report_dir: PathBuf,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CRM_INSTANCE_URL`: Base URL of the CRM instance
    /// - `CRM_ACCESS_TOKEN`: Bearer token for the CRM
    ///
    /// Everything else falls back to the defaults documented on [`Config`].
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let crm_instance_url = env::var("CRM_INSTANCE_URL")
            .map_err(|_| ConfigError::MissingVar("CRM_INSTANCE_URL".to_string()))?;

        let crm_access_token = env::var("CRM_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingVar("CRM_ACCESS_TOKEN".to_string()))?;

        let defaults = Config::default();

        let config = Config {
            crm_instance_url,
            crm_access_token,
            crm_api_version: env::var("CRM_API_VERSION").unwrap_or(defaults.crm_api_version),
            webdriver_url: env::var("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            contact_limit: Self::parse_env("CONTACT_LIMIT", defaults.contact_limit)?,
            staleness_months: Self::parse_env("STALE_MONTHS", defaults.staleness_months)?,
            dry_run: Self::parse_env_bool("DRY_RUN", defaults.dry_run)?,
            verbose: Self::parse_env_bool("VERBOSE", defaults.verbose)?,
            validate_email: Self::parse_env_bool("VALIDATE_EMAIL", defaults.validate_email)?,
            min_request_interval_ms: Self::parse_env(
                "MIN_REQUEST_INTERVAL_MS",
                defaults.min_request_interval_ms,
            )?,
            batch_size: Self::parse_env("BATCH_SIZE", defaults.batch_size)?,
            contact_delay_ms: Self::parse_env("CONTACT_DELAY_MS", defaults.contact_delay_ms)?,
            search_delay_min_ms: Self::parse_env(
                "SEARCH_DELAY_MIN_MS",
                defaults.search_delay_min_ms,
            )?,
            search_delay_max_ms: Self::parse_env(
                "SEARCH_DELAY_MAX_MS",
                defaults.search_delay_max_ms,
            )?,
            navigation_timeout_secs: Self::parse_env(
                "NAVIGATION_TIMEOUT_SECS",
                defaults.navigation_timeout_secs,
            )?,
            request_timeout: Self::parse_env("REQUEST_TIMEOUT", defaults.request_timeout)?,
            report_dir: env::var("REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// Called by [`Config::from_env`] and again by the binary after command-line
    /// overrides have been applied.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.crm_instance_url.starts_with("http://")
            && !self.crm_instance_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "CRM_INSTANCE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if self.crm_access_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CRM_ACCESS_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "BATCH_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.contact_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_LIMIT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.search_delay_min_ms > self.search_delay_max_ms {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_DELAY_MIN_MS".to_string(),
                reason: format!(
                    "Must not exceed SEARCH_DELAY_MAX_MS ({} > {})",
                    self.search_delay_min_ms, self.search_delay_max_ms
                ),
            });
        }

        Ok(())
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Parse an environment variable as a number with a default value.
    fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> ConfigResult<T> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            crm_instance_url: String::new(),
            crm_access_token: String::new(),
            crm_api_version: "v59.0".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            contact_limit: 25,
            staleness_months: 6,
            dry_run: false,
            verbose: false,
            validate_email: true,
            min_request_interval_ms: 1000,
            batch_size: 10,
            contact_delay_ms: 3000,
            search_delay_min_ms: 1000,
            search_delay_max_ms: 3000,
            navigation_timeout_secs: 15,
            request_timeout: 10,
            report_dir: PathBuf::from("reports"),
            log_level: "info".to_string(),
        }
    }
}
