//! Fare policy: base fare plus a per-distance-unit rate.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spatial::{distance_between, Point};

/// Base fare in currency units.
pub const BASE_FARE: f64 = 250.0;

/// Rate per unit of straight-line distance.
pub const PER_UNIT_RATE: f64 = 100.0;

/// Fare policy resource. Defaults match [`BASE_FARE`] and [`PER_UNIT_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct FarePolicy {
    pub base_fare: f64,
    pub per_unit_rate: f64,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            base_fare: BASE_FARE,
            per_unit_rate: PER_UNIT_RATE,
        }
    }
}

impl FarePolicy {
    pub fn new(base_fare: f64, per_unit_rate: f64) -> Self {
        Self {
            base_fare,
            per_unit_rate,
        }
    }

    /// Both values must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("base_fare", self.base_fare),
            ("per_unit_rate", self.per_unit_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Formula: `round2(base_fare + distance * per_unit_rate)`.
    pub fn fare_for_distance(&self, distance: f64) -> f64 {
        round_to_cents(self.base_fare + distance * self.per_unit_rate)
    }

    pub fn calculate_trip_fare(&self, pickup: Point, dropoff: Point) -> f64 {
        self.fare_for_distance(distance_between(pickup, dropoff))
    }
}

/// Round the exact binary value to two decimal places, ties to even.
///
/// Goes through the `{:.2}` formatter, which works on the exact decimal
/// expansion; `(amount * 100.0).round()` would round once more in the
/// multiplication and can land on a spurious half-cent.
pub fn round_to_cents(amount: f64) -> f64 {
    format!("{amount:.2}").parse().unwrap_or(amount)
}
