use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_DISTRICT: &str = "Central District";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// District recorded on admins created by the demo seed.
    pub district: String,
    pub currency_symbol: String,
    /// Row cap for "recent" lists on overviews.
    pub recent_limit: usize,
    pub seed_demo_data: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            district: DEFAULT_DISTRICT.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            seed_demo_data: true,
        }
    }
}

impl DashboardConfig {
    /// A missing file yields the defaults; a present but malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let config: DashboardConfig = toml::from_str(raw)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.district.trim().is_empty() {
            self.district = DEFAULT_DISTRICT.to_string();
        }
        if self.recent_limit == 0 {
            self.recent_limit = DEFAULT_RECENT_LIMIT;
        }
        self
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
        }
    }
}
