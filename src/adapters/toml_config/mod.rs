// TOML config adapter - Configuration file loading

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::config::{config_error, AppConfig};
use crate::error::CatClipResult;

/// Loads `AppConfig` from a TOML file
#[derive(Debug, Clone)]
pub struct TomlConfigAdapter {
    path: PathBuf,
}

impl TomlConfigAdapter {
    /// File picked up from the working directory when no path is given
    pub const DEFAULT_FILE: &'static str = "catclip.toml";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Adapter for the explicit path, else for `catclip.toml` if it exists
    pub fn discover(explicit: Option<&Path>) -> Option<Self> {
        match explicit {
            Some(path) => Some(Self::new(path)),
            None => {
                let default = Path::new(Self::DEFAULT_FILE);
                default.is_file().then(|| Self::new(default))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file; sections and keys left out keep their defaults
    pub fn load(&self) -> CatClipResult<AppConfig> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            config_error(format!("cannot read config file {}: {}", self.path.display(), e))
        })?;
        let config = Self::parse(&content)
            .map_err(|e| config_error(format!("{}: {}", self.path.display(), e)))?;
        debug!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Parse TOML text into a configuration
    pub fn parse(content: &str) -> Result<AppConfig, toml::de::Error> {
        toml::from_str(content)
    }
}
