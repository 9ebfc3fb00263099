//! Events emitted by the core for the presentation layer.

use bevy_ecs::prelude::Resource;

use crate::ecs::{DriverId, RideId, RiderId};
use crate::spatial::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    RiderRegistered {
        rider_id: RiderId,
        name: String,
    },
    DriverRegistered {
        driver_id: DriverId,
        name: String,
        position: Point,
    },
    RideStarted {
        ride_id: RideId,
        driver_name: String,
        fare: f64,
    },
    RideCompleted {
        ride_id: RideId,
        fare: f64,
    },
}

impl DispatchEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchEvent::RiderRegistered { .. } => "rider_registered",
            DispatchEvent::DriverRegistered { .. } => "driver_registered",
            DispatchEvent::RideStarted { .. } => "ride_started",
            DispatchEvent::RideCompleted { .. } => "ride_completed",
        }
    }
}

/// Buffer of emitted events, oldest first. Lives in the core's world.
#[derive(Debug, Default, Resource)]
pub struct DispatchEvents {
    pending: Vec<DispatchEvent>,
}

impl DispatchEvents {
    pub fn emit(&mut self, event: DispatchEvent) {
        log::trace!("emit {}", event.kind());
        self.pending.push(event);
    }

    /// Remove and return everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<DispatchEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_events_in_emission_order_and_empties_buffer() {
        let mut events = DispatchEvents::default();
        events.emit(DispatchEvent::RiderRegistered {
            rider_id: RiderId(1),
            name: "Ana".to_string(),
        });
        events.emit(DispatchEvent::RideCompleted {
            ride_id: RideId(1),
            fare: 350.0,
        });

        let drained = events.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind(), "rider_registered");
        assert_eq!(drained[1].kind(), "ride_completed");
        assert!(events.drain().is_empty());
    }
}
