//! World generation settings.
//!
//! Gameplay tuning is fixed in [`crate::constants`]; only the shape of the
//! generated world varies between runs. Missing fields take the defaults of
//! the shipped game, so `{}` is a valid configuration.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters for [`crate::spawn_world::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Side length of the square ground plane centred on the origin.
    pub ground_size: f32,
    /// Number of trees.
    pub trees: usize,
    /// Number of buildings.
    pub buildings: usize,
    /// Number of walls.
    pub walls: usize,
    /// Number of enemies.
    pub enemies: usize,
    /// Seed for the world RNG; the same seed yields the same world.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ground_size: 1000.0,
            trees: 600,
            buildings: 100,
            walls: 300,
            enemies: 5,
            seed: 0,
        }
    }
}

impl WorldConfig {
    /// Default world with a different seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`WorldConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded world config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Checks that the world generator can honour these settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ground_size.is_finite() || self.ground_size <= 0.0 {
            return Err(ConfigError::invalid(
                "ground_size",
                format!("must be positive, got {}", self.ground_size),
            ));
        }
        if self.enemies == 0 {
            return Err(ConfigError::invalid("enemies", "at least one enemy is required"));
        }
        Ok(())
    }

    /// Half the ground side: positions are drawn from `[-half, half)`.
    #[must_use]
    pub fn half_extent(&self) -> f32 {
        self.ground_size / 2.0
    }
}
