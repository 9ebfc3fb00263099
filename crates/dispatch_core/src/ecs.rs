//! Entity ids and ECS components for riders, drivers and rides.
//!
//! Rides point at their rider and driver by [`Entity`]; driver position and
//! availability live only on the driver entity.

use std::fmt;

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::spatial::Point;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// First id handed out for this entity type.
            pub const FIRST: Self = Self(1);

            pub fn get(self) -> u64 {
                self.0
            }

            pub(crate) fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Sequential rider identifier, starting at 1.
    RiderId
);
entity_id!(
    /// Sequential driver identifier, starting at 1.
    DriverId
);
entity_id!(
    /// Sequential ride identifier, starting at 1.
    RideId
);

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
}

/// Current location of a driver. Updated to the dropoff point when a ride completes.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub Point);

/// Marker: driver can be matched. Removed on assignment, re-inserted on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Component)]
pub struct Available;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Ride {
    pub id: RideId,
    pub rider: Entity,
    pub driver: Entity,
    pub pickup: Point,
    pub dropoff: Point,
    /// Straight-line distance from pickup to dropoff.
    pub distance: f64,
    /// Fixed when the ride is created; never recomputed.
    pub fare: f64,
}

/// Marker: ride has been completed. Inserted exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Component)]
pub struct Completed;
