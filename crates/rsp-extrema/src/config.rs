use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Detector configuration.
///
/// ```toml
/// sampling_rate = 1000
/// outlier_threshold = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremaConfig {
    /// Samples per second. Reported with the result, never used by detection.
    pub sampling_rate: u32,
    /// Fraction of the mean extremum-to-extremum distance below which an
    /// extremum is discarded as noise.
    pub outlier_threshold: f64,
}

impl Default for ExtremaConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 1000,
            outlier_threshold: 0.3,
        }
    }
}

impl ExtremaConfig {
    pub fn new(sampling_rate: u32, outlier_threshold: f64) -> Self {
        Self {
            sampling_rate,
            outlier_threshold,
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExtremaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration with environment variable overrides.
    /// Variables are prefixed with RSP_, e.g. RSP_OUTLIER_THRESHOLD=0.5
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. User config file (if exists)
    /// 3. Default config file
    /// 4. Built-in defaults (lowest priority)
    pub fn load_layered(
        default_path: Option<&Path>,
        user_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = ExtremaConfig::default();

        if let Some(path) = default_path {
            if path.exists() {
                config = Self::from_file(path)?;
            }
        }

        if let Some(path) = user_path {
            if path.exists() {
                config = Self::from_file(path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("RSP_SAMPLING_RATE") {
            self.sampling_rate = val.trim().parse().map_err(|_| {
                ConfigError::Validation("Invalid RSP_SAMPLING_RATE".to_string())
            })?;
        }
        if let Some(val) = lookup("RSP_OUTLIER_THRESHOLD") {
            self.outlier_threshold = val.trim().parse().map_err(|_| {
                ConfigError::Validation("Invalid RSP_OUTLIER_THRESHOLD".to_string())
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling_rate == 0 {
            return Err(ConfigError::Validation(
                "sampling_rate must be positive".to_string(),
            ));
        }
        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(ConfigError::Validation(format!(
                "outlier_threshold must be finite and non-negative, got {}",
                self.outlier_threshold
            )));
        }
        Ok(())
    }
}
