use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Base URL of the official Go download page
pub const DEFAULT_CATALOG_URL: &str = "https://go.dev";

/// Command used when no versioned executable is requested
pub const DEFAULT_COMMAND: &str = "go";

/// Timeout for catalog fetches in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Prefix of the environment variables that override file configuration
pub const ENV_PREFIX: &str = "GOCMD_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Resolver configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Base URL serving `/dl/?mode=json&include=all`
    pub catalog_url: String,
    /// Name or path of the default toolchain command
    pub default_command: String,
    /// Search path for versioned executables; `PATH` when unset
    pub search_path: Option<String>,
    /// Catalog fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Use the embedded catalog snapshot instead of the network
    pub offline: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            default_command: DEFAULT_COMMAND.to_string(),
            search_path: None,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            offline: false,
        }
    }
}

impl ResolverConfig {
    /// Loads the configuration from an optional JSON file, then applies
    /// `GOCMD_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}")).filter(|v| !v.is_empty());

        if let Some(url) = var("CATALOG_URL") {
            self.catalog_url = url;
        }
        if let Some(command) = var("DEFAULT_COMMAND") {
            self.default_command = command;
        }
        if let Some(path) = var("SEARCH_PATH") {
            self.search_path = Some(path);
        }
        if let Some(value) = var("OFFLINE") {
            self.offline = parse_bool(&format!("{ENV_PREFIX}OFFLINE"), &value)?;
        }

        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
