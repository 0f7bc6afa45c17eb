//! Tool configuration.
//!
//! Handles loading and validating an optional `config.toml`. Stock defaults
//! are overridden by whatever the file sets; everything is optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! sampling = "lanczos3"   # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [output]
//! jpeg_quality = 90       # JPEG encoding quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, Sampling};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Resize settings.
    pub resize: ResizeConfig,
    /// Encoding settings for written files.
    pub output: OutputConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::Validation(
                "output.jpeg_quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.jpeg_quality)
    }
}

/// Resize settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Resampling kernel.
    pub sampling: Sampling,
}

/// Encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: Quality::default().value(),
        }
    }
}

/// Load `config.toml` from the given directory.
///
/// Returns the defaults if the file does not exist. Returns `Err` if the
/// file is unreadable, is invalid TOML, has unknown keys, or fails validation.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgtweak configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resize
# ---------------------------------------------------------------------------
[resize]
# Resampling kernel used when resizing.
# One of: nearest, triangle, catmull-rom, gaussian, lanczos3.
sampling = "lanczos3"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG encoding quality (1 = worst, 100 = best).
# Other formats are written losslessly.
jpeg_quality = 90
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.resize.sampling, Sampling::Lanczos3);
        assert_eq!(config.output.jpeg_quality, 90);
        assert_eq!(config.quality(), Quality::new(90));
    }

    #[test]
    fn parse_partial_config() {
        let config: Config = toml::from_str("[output]\njpeg_quality = 70\n").unwrap();
        assert_eq!(config.output.jpeg_quality, 70);
        assert_eq!(config.resize.sampling, Sampling::Lanczos3);
    }

    #[test]
    fn parse_sampling_names() {
        let config: Config = toml::from_str("[resize]\nsampling = \"catmull-rom\"\n").unwrap();
        assert_eq!(config.resize.sampling, Sampling::CatmullRom);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<Config, _> = toml::from_str("[resize]\nwidth = 10\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_sampling_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[resize]\nsampling = \"bicubic\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: Config = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[resize]\nsampling = \"nearest\"\n\n[output]\njpeg_quality = 55\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.resize.sampling, Sampling::Nearest);
        assert_eq!(config.output.jpeg_quality, 55);
    }

    #[test]
    fn load_config_validates_quality() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[output]\njpeg_quality = 0\n").unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_config_reports_bad_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[output\n").unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }
}
