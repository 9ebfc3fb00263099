//! In-memory ride dispatch: registers riders and drivers, matches each ride
//! request to the nearest available driver, and tracks rides to completion.

pub mod config;
pub mod dispatcher;
pub mod ecs;
pub mod error;
pub mod events;
pub mod matching;
pub mod pricing;
pub mod spatial;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use crate::config::DispatchConfig;
pub use crate::dispatcher::DispatchCore;
pub use crate::ecs::{DriverId, RideId, Rider, RiderId};
pub use crate::error::{ConfigError, DispatchError};
pub use crate::events::DispatchEvent;
pub use crate::pricing::FarePolicy;
pub use crate::spatial::Point;
pub use crate::telemetry::{DispatchCounts, DriverSnapshot, RideSnapshot, RideStatus, RideSummary};
