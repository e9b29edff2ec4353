//! # Mapper Configuration
//!
//! Tunables for convention inference, the recursion guard and the resolution
//! cache. Values come from `Default`, then optionally from a config file, then
//! from `AUTOMAP_*` environment variables.
//!
//! ```rust
//! use automap_core::config::MapperConfig;
//!
//! let config = MapperConfig::default();
//! assert_eq!(config.min_confidence, 0.7);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Minimum confidence for an implicit property pairing.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Nesting depth at which the recursion guard reports a cyclic graph.
pub const DEFAULT_MAX_DEPTH: usize = 32;

const ENV_PREFIX: &str = "AUTOMAP";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Scores below this never produce an implicit pairing.
    pub min_confidence: f64,
    pub max_depth: usize,
    /// When false every call resolves its configuration afresh.
    pub cache_enabled: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_depth: DEFAULT_MAX_DEPTH,
            cache_enabled: true,
        }
    }
}

impl MapperConfig {
    /// Defaults overridden by `AUTOMAP_MIN_CONFIDENCE`, `AUTOMAP_MAX_DEPTH`
    /// and `AUTOMAP_CACHE_ENABLED`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let config: Self = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(?config, "Mapper configuration loaded from environment");
        Ok(config)
    }

    /// Load from a file (format picked from the extension), then apply env overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let config: Self = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(path = %path.display(), ?config, "Mapper configuration loaded from file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.min_confidence) || self.min_confidence.is_nan() {
            return Err(ConfigurationError::invalid_value(
                "min_confidence",
                self.min_confidence,
                "must be within [0.0, 1.0]",
            ));
        }

        if self.max_depth == 0 {
            return Err(ConfigurationError::invalid_value(
                "max_depth",
                self.max_depth,
                "must allow at least one level of nesting",
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}
