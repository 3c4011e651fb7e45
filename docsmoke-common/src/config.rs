//! Configuration loading and connection-string resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted for the connection string
pub const URI_ENV_VAR: &str = "DOCSMOKE_MONGO_URI";

/// Compiled default connection string (local server, database `h6`)
pub const DEFAULT_MONGO_URI: &str = "mongodb://127.0.0.1:27017/h6";

/// Database name the suite expects the connection string to select
pub const DEFAULT_DATABASE: &str = "h6";

fn default_log_level() -> String {
    "info".to_string()
}

/// `[logging]` table of the TOML config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub mongo_uri: Option<String>,
    pub database: Option<String>,
    pub reset_collections: Option<bool>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fully resolved harness settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Connection string, used verbatim to open the client
    pub mongo_uri: String,
    /// Database name the connection string is expected to select
    pub database: String,
    /// Drop the scenario collections before running
    pub reset_collections: bool,
    /// Default tracing filter level (RUST_LOG overrides)
    pub log_level: String,
}

impl Settings {
    /// Settings pointing at `mongo_uri` with every other value defaulted
    pub fn with_uri(mongo_uri: impl Into<String>) -> Self {
        Self {
            mongo_uri: mongo_uri.into(),
            database: DEFAULT_DATABASE.to_string(),
            reset_collections: false,
            log_level: default_log_level(),
        }
    }
}

/// Settings resolution following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. Compiled default (fallback)
#[derive(Debug, Clone)]
pub struct SettingsResolver {
    cli_uri: Option<String>,
    config_path: Option<PathBuf>,
    env_var_name: String,
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self {
            cli_uri: None,
            config_path: None,
            env_var_name: URI_ENV_VAR.to_string(),
        }
    }

    /// Connection string given on the command line
    pub fn with_cli_uri(mut self, uri: Option<String>) -> Self {
        self.cli_uri = uri;
        self
    }

    /// Explicit config file; when set it must exist
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Override the environment variable name
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    pub fn resolve(&self) -> Result<Settings> {
        let toml_config = match &self.config_path {
            Some(path) => load_toml_config(path)?,
            None => match default_config_path() {
                Some(path) => load_toml_config(&path)?,
                None => {
                    debug!("No config file found, using compiled defaults");
                    TomlConfig::default()
                }
            },
        };

        let mongo_uri = self.resolve_uri(&toml_config);
        if mongo_uri.trim().is_empty() {
            return Err(Error::Config("connection string is empty".to_string()));
        }

        Ok(Settings {
            mongo_uri,
            database: toml_config
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            reset_collections: toml_config.reset_collections.unwrap_or(false),
            log_level: toml_config.logging.level,
        })
    }

    fn resolve_uri(&self, toml_config: &TomlConfig) -> String {
        // Priority 1: Command-line argument
        if let Some(uri) = &self.cli_uri {
            return uri.clone();
        }

        // Priority 2: Environment variable
        if let Ok(uri) = std::env::var(&self.env_var_name) {
            return uri;
        }

        // Priority 3: TOML config file
        if let Some(uri) = &toml_config.mongo_uri {
            return uri.clone();
        }

        // Priority 4: Compiled default
        DEFAULT_MONGO_URI.to_string()
    }
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a TOML config file
///
/// A missing file is an error here; callers probing optional locations use
/// [`default_config_path`] first.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Locate the platform config file, if one exists
///
/// Linux checks `~/.config/docsmoke/config.toml` then
/// `/etc/docsmoke/config.toml`; other platforms check the user config dir.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("docsmoke").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/docsmoke/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Render a connection string for logs with any password masked
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let authority = &rest[..authority_end];

    match authority.rfind('@') {
        Some(at) => {
            let credentials = &authority[..at];
            let user = credentials.split(':').next().unwrap_or("");
            if credentials.contains(':') {
                format!(
                    "{}{}:****{}",
                    &uri[..scheme_end + 3],
                    user,
                    &rest[at..]
                )
            } else {
                uri.to_string()
            }
        }
        None => uri.to_string(),
    }
}
