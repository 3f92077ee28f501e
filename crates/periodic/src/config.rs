//! # Engine Configuration
//!
//! Loaded once at startup from a TOML file. Every key is optional; missing
//! keys fall back to [`EngineConfig::default`].
//!
//! ```toml
//! base_duration_ms = 2000.0
//! initial_layout = "table"
//! jitter_seed = 42
//! scatter_extent = 4000.0
//! frame_interval_ms = 16.666
//! request_capacity = 16
//! easing = "exponential_in_out"
//! ```

use std::path::{Path, PathBuf};

use periodic_layout::LayoutName;
use periodic_shared::{DEFAULT_BASE_DURATION_MS, FRAME_INTERVAL_MS, SCATTER_EXTENT};
use periodic_tween::{Easing, RandomSource, RngSource, TransitionManager};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`EngineConfig`].
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for the engine and its frame driver.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Base duration handed to every layout trigger (milliseconds).
    pub base_duration_ms: f64,
    /// Layout entered right after the records load.
    pub initial_layout: LayoutName,
    /// Seed for duration jitter and initial scatter. `None` draws from OS entropy.
    pub jitter_seed: Option<u64>,
    /// Edge length of the cube cards start in.
    pub scatter_extent: f32,
    /// Simulated time between frames (milliseconds).
    pub frame_interval_ms: f64,
    /// Deferred transition requests that may wait for a tick.
    pub request_capacity: usize,
    /// Easing of every card task.
    pub easing: Easing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_duration_ms: DEFAULT_BASE_DURATION_MS,
            initial_layout: LayoutName::Table,
            jitter_seed: None,
            scatter_extent: SCATTER_EXTENT,
            frame_interval_ms: FRAME_INTERVAL_MS,
            request_capacity: TransitionManager::DEFAULT_REQUEST_CAPACITY,
            easing: Easing::ExponentialInOut,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.base_duration_ms.is_finite() || self.base_duration_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "base_duration_ms must be finite and >= 0, got {}",
                self.base_duration_ms
            )));
        }
        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame_interval_ms must be finite and > 0, got {}",
                self.frame_interval_ms
            )));
        }
        if !self.scatter_extent.is_finite() || self.scatter_extent < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scatter_extent must be finite and >= 0, got {}",
                self.scatter_extent
            )));
        }
        if self.request_capacity == 0 {
            return Err(ConfigError::Invalid("request_capacity must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Random source for jitter and scatter, seeded if configured.
    #[must_use]
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.jitter_seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        }
    }
}
