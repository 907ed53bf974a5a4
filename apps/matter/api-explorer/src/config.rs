//! Configuration for the API explorer

use std::path::PathBuf;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use domain_explorer::auth::{DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};

pub const DEFAULT_API_HOST: &str = "https://api.getmatter.app/api/v11";

const SETTINGS_FILE: &str = "settings.json";
const ENDPOINTS_FILE: &str = "endpoints.json";
const RESULTS_FILE: &str = "api-results.json";
const SUMMARY_FILE: &str = "successful-endpoints.json";
const HIGHLIGHTS_FILE: &str = "highlights.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub api_host: String,
    /// Directory holding settings, the endpoint catalog and all outputs
    pub data_dir: PathBuf,
    pub auth_poll_attempts: u32,
    pub auth_poll_interval: Duration,
}

impl Config {
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn endpoints_file(&self) -> PathBuf {
        self.data_dir.join(ENDPOINTS_FILE)
    }

    pub fn results_file(&self) -> PathBuf {
        self.data_dir.join(RESULTS_FILE)
    }

    pub fn summary_file(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE)
    }

    pub fn highlights_file(&self) -> PathBuf {
        self.data_dir.join(HIGHLIGHTS_FILE)
    }
}

impl FromEnv for Config {
    /// Reads from environment variables with defaults:
    /// - MATTER_API_HOST: defaults to the public v11 API
    /// - EXPLORER_DATA_DIR: defaults to `data`
    /// - EXPLORER_AUTH_POLL_ATTEMPTS: defaults to 600
    /// - EXPLORER_AUTH_POLL_INTERVAL_MS: defaults to 1000
    fn from_env() -> Result<Self, ConfigError> {
        let interval_ms = env_parse_or(
            "EXPLORER_AUTH_POLL_INTERVAL_MS",
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?;

        Ok(Self {
            api_host: env_or_default("MATTER_API_HOST", DEFAULT_API_HOST)
                .trim_end_matches('/')
                .to_string(),
            data_dir: PathBuf::from(env_or_default("EXPLORER_DATA_DIR", "data")),
            auth_poll_attempts: env_parse_or("EXPLORER_AUTH_POLL_ATTEMPTS", DEFAULT_POLL_ATTEMPTS)?,
            auth_poll_interval: Duration::from_millis(interval_ms),
        })
    }
}
