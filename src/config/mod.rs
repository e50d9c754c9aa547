use crate::converter::ConverterOptions;
use crate::format::MAX_PRECISION;
use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the command line front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fractional digits kept when rounding
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Use 1024 between units instead of 1000
    #[serde(default)]
    pub binary: bool,

    /// Print results as JSON by default
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            binary: false,
            json: false,
        }
    }
}

fn default_precision() -> usize {
    ConverterOptions::default().precision
}

impl Config {
    /// Load config from file, or fall back to defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        if config.precision > MAX_PRECISION {
            bail!(
                "Invalid precision {} in config file: must be at most {}",
                config.precision,
                MAX_PRECISION
            );
        }
        debug!("Loaded config from {}: {:?}", path.as_ref().display(), config);

        Ok(config)
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("byte-units").join("config.toml")
        } else {
            PathBuf::from(".byte-units.toml")
        }
    }

    /// Create config directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::default_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Ok(config_path)
    }

    /// Converter options, with command line overrides applied on top
    pub fn options(&self, precision: Option<usize>, binary: bool) -> ConverterOptions {
        ConverterOptions::default()
            .with_precision(precision.unwrap_or(self.precision))
            .with_binary(binary || self.binary)
    }
}
