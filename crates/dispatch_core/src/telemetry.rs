//! Read-only snapshots of dispatch state handed out across the core's lock.
//!
//! Nothing here references ECS entities: snapshots are plain values built under
//! the lock and safe to keep after it is released.

use std::fmt;

use serde::Serialize;

use crate::ecs::{DriverId, RideId, RiderId};
use crate::spatial::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Active,
    Completed,
}

impl RideStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RideStatus::Active => "active",
            RideStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the ride listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideSummary {
    pub ride_id: RideId,
    pub status: RideStatus,
    pub rider_name: String,
    pub driver_name: String,
}

/// Driver state at the time of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSnapshot {
    pub id: DriverId,
    pub name: String,
    pub position: Point,
    pub available: bool,
}

/// Full ride record at the time of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RideSnapshot {
    pub id: RideId,
    pub rider_id: RiderId,
    pub driver_id: DriverId,
    pub pickup: Point,
    pub dropoff: Point,
    pub distance: f64,
    pub fare: f64,
    pub completed: bool,
}

impl RideSnapshot {
    pub fn status(&self) -> RideStatus {
        if self.completed {
            RideStatus::Completed
        } else {
            RideStatus::Active
        }
    }
}

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchCounts {
    pub riders: usize,
    pub drivers_available: usize,
    pub drivers_busy: usize,
    pub rides_active: usize,
    pub rides_completed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels() {
        assert_eq!(RideStatus::Active.to_string(), "active");
        assert_eq!(RideStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn snapshot_status_follows_completed_flag() {
        let mut ride = RideSnapshot {
            id: RideId(1),
            rider_id: RiderId(1),
            driver_id: DriverId(1),
            pickup: Point::new(0.0, 0.0),
            dropoff: Point::new(1.0, 0.0),
            distance: 1.0,
            fare: 350.0,
            completed: false,
        };
        assert_eq!(ride.status(), RideStatus::Active);
        ride.completed = true;
        assert_eq!(ride.status(), RideStatus::Completed);
    }
}
