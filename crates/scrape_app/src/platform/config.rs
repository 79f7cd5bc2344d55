use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use scrape_core::{HeaderMap, DEFAULT_RATE_LIMIT, MAX_RATE_LIMIT, MIN_RATE_LIMIT};
use scrape_engine::DEFAULT_BACKEND_URL;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "fastscraper.ron";
const SESSION_DIR_NAME: &str = "fastscraper-session";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("rate_limit {0} outside 1..=20")]
    RateLimit(u32),
    #[error("unknown log_level {0:?}")]
    LogLevel(String),
}

/// Settings read from `fastscraper.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    /// Directory of the results handoff store; a temp dir when unset.
    pub store_dir: Option<PathBuf>,
    pub export_dir: PathBuf,
    pub rate_limit: u32,
    pub headers: HeaderMap,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            store_dir: None,
            export_dir: PathBuf::from("."),
            rate_limit: DEFAULT_RATE_LIMIT,
            headers: HeaderMap::new(),
            proxy: None,
            user_agent: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = ron::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RATE_LIMIT..=MAX_RATE_LIMIT).contains(&self.rate_limit) {
            return Err(ConfigError::RateLimit(self.rate_limit));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        client_logging::parse_level(&self.log_level)
            .ok_or_else(|| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(SESSION_DIR_NAME))
    }
}

/// Loads the config at `path`. A missing file yields defaults unless `required`.
pub fn load_config(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => AppConfig::from_ron(&text, path),
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
