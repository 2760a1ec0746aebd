//! Errors raised at the edges of the simulation.
//!
//! Gameplay never fails: collisions, deaths and double game-over triggers are
//! ordinary state transitions. Only loading configuration can go wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or accept a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path:?}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for a world configuration.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the world generator cannot use.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
