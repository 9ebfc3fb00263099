//! Errors reported by the dispatch core and its configuration loader.

use std::path::PathBuf;

use crate::ecs::{RideId, RiderId};

/// Expected, caller-recoverable failures of dispatch operations.
///
/// Every failing operation leaves the core exactly as it found it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// `request_ride` referenced an unknown rider.
    #[error("rider {0} not found")]
    RiderNotFound(RiderId),
    /// `request_ride` found no driver with availability set.
    #[error("no available drivers")]
    NoDriverAvailable,
    /// `complete_ride` referenced an unknown ride.
    #[error("ride {0} not found")]
    RideNotFound(RideId),
    /// `complete_ride` was called on a ride that is already completed.
    #[error("ride {0} already completed")]
    RideAlreadyCompleted(RideId),
}

/// Errors raised while loading a [`DispatchConfig`](crate::config::DispatchConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
