//! Configuration for folio.
//!
//! Settings come from a TOML file (`--config`, or `folio.toml` in the working
//! directory). Command-line flags override them; each flag also reads a
//! `FOLIO_*` environment variable through clap.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::loader::DEFAULT_TIMEOUT;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

pub const DEFAULT_CONTENT_PATH: &str = "/assets/data/content.json";
pub const DEFAULT_WORKS_PATH: &str = "/assets/data/works.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL that relative content paths and poster URLs resolve against.
    pub base_url: Option<Url>,
    /// Location of the content document.
    pub content: String,
    /// Location of the works document.
    pub works: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: None,
            content: DEFAULT_CONTENT_PATH.to_string(),
            works: DEFAULT_WORKS_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: None,
        }
    }
}

/// Values that take precedence over the config file: command-line flags,
/// each backed by a `FOLIO_*` environment variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub content: Option<String>,
    pub works: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// Load from an explicit file, or `folio.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => match Self::load_from_path(Path::new(DEFAULT_CONFIG_FILE)) {
                Err(ConfigError::Read { source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    Ok(Self::default())
                }
                other => other,
            },
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Using config file {}", path.display());
        Self::from_toml(&text)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .validate()
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply flag/environment overrides on top of file settings.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(v) = overrides.base_url {
            self.base_url = Some(parse_base_url("base_url", &v)?);
        }
        if let Some(v) = overrides.content {
            self.content = v;
        }
        if let Some(v) = overrides.works {
            self.works = v;
        }
        if let Some(v) = overrides.timeout_secs {
            self.timeout_secs = v;
        }
        if let Some(v) = overrides.user_agent {
            self.user_agent = Some(v);
        }
        self.validate()
    }

    /// Reject values the loader cannot work with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse a base URL, making sure directory-like bases end with `/` so that
/// relative joins stay inside them.
pub fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim()).map_err(|e| ConfigError::Invalid {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("{} cannot be used as a base URL", value),
        });
    }
    let path = url.path().to_string();
    let last = path.rsplit('/').next().unwrap_or("");
    if !path.ends_with('/') && !last.contains('.') {
        url.set_path(&format!("{}/", path));
    }
    Ok(url)
}
