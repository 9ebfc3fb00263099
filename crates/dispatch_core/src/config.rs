//! Construction-time configuration for the dispatch core.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pricing::FarePolicy;

/// Settings fixed when a [`DispatchCore`](crate::dispatcher::DispatchCore) is built.
///
/// Missing fields fall back to defaults, so `{}` is a valid config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub fare: FarePolicy,
}

impl DispatchConfig {
    pub fn with_fare_policy(mut self, fare: FarePolicy) -> Self {
        self.fare = fare;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fare.validate()
    }
}
