//! The dispatch core: sole owner of riders, drivers and rides.
//!
//! All state lives in one ECS [`World`] behind a single mutex. Every operation
//! takes the lock for its whole duration, which makes "pick the nearest
//! available driver, then reserve it" one atomic step: two concurrent requests
//! can never book the same driver.
//!
//! Operations validate before they mutate. A failed call leaves every entity
//! exactly as it found it.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bevy_ecs::prelude::{Entity, With, World};

use crate::config::DispatchConfig;
use crate::ecs::{
    Available, Completed, Driver, DriverId, Position, Ride, RideId, Rider, RiderId,
};
use crate::error::{ConfigError, DispatchError};
use crate::events::{DispatchEvent, DispatchEvents};
use crate::matching::{MatchingAlgorithm, MatchingAlgorithmResource, NearestAvailable};
use crate::pricing::FarePolicy;
use crate::spatial::{distance_between, Point};
use crate::telemetry::{DispatchCounts, DriverSnapshot, RideSnapshot, RideSummary};

pub struct DispatchCore {
    state: Mutex<DispatchState>,
}

struct DispatchState {
    world: World,
    riders: BTreeMap<RiderId, Entity>,
    drivers: BTreeMap<DriverId, Entity>,
    rides: BTreeMap<RideId, Entity>,
    next_rider_id: RiderId,
    next_driver_id: DriverId,
    next_ride_id: RideId,
}

impl Default for DispatchCore {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchCore {
    /// Core with the default fare policy and nearest-available matching.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Build from an already validated config (see [`DispatchConfig::validate`]).
    pub fn with_config(config: DispatchConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(config.fare);
        world.insert_resource(DispatchEvents::default());
        world.insert_resource(MatchingAlgorithmResource::new(Box::new(NearestAvailable)));

        Self {
            state: Mutex::new(DispatchState {
                world,
                riders: BTreeMap::new(),
                drivers: BTreeMap::new(),
                rides: BTreeMap::new(),
                next_rider_id: RiderId::FIRST,
                next_driver_id: DriverId::FIRST,
                next_ride_id: RideId::FIRST,
            }),
        }
    }

    /// Swap in a different fare policy. Rejects negative or non-finite values.
    pub fn with_fare_policy(self, fare: FarePolicy) -> Result<Self, ConfigError> {
        fare.validate()?;
        Ok(self.configure(|state| state.world.insert_resource(fare)))
    }

    /// Replace the matching algorithm.
    pub fn with_matching(self, algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        self.configure(|state| {
            state
                .world
                .insert_resource(MatchingAlgorithmResource::new(algorithm))
        })
    }

    fn configure(mut self, apply: impl FnOnce(&mut DispatchState)) -> Self {
        apply(self.state.get_mut().unwrap_or_else(PoisonError::into_inner));
        self
    }

    fn lock(&self) -> MutexGuard<'_, DispatchState> {
        // Operations never leave partial updates behind, so a poisoned lock
        // still guards consistent state.
        self.state.lock().unwrap_or_else(|poisoned| {
            log::warn!("dispatch state lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    pub fn fare_policy(&self) -> FarePolicy {
        *self.lock().world.resource::<FarePolicy>()
    }

    pub fn register_rider(&self, name: impl Into<String>) -> Rider {
        let mut guard = self.lock();
        let state = &mut *guard;

        let id = state.next_rider_id;
        state.next_rider_id = id.next();
        let rider = Rider {
            id,
            name: name.into(),
        };
        let entity = state.world.spawn(rider.clone()).id();
        state.riders.insert(id, entity);

        log::info!("registered rider {} with id {}", rider.name, id);
        state.emit(DispatchEvent::RiderRegistered {
            rider_id: id,
            name: rider.name.clone(),
        });
        rider
    }

    /// New drivers start available at `(x, y)`.
    pub fn register_driver(&self, name: impl Into<String>, x: f64, y: f64) -> DriverSnapshot {
        let mut guard = self.lock();
        let state = &mut *guard;

        let id = state.next_driver_id;
        state.next_driver_id = id.next();
        let position = Point::new(x, y);
        let driver = Driver {
            id,
            name: name.into(),
        };
        let entity = state
            .world
            .spawn((driver.clone(), Position(position), Available))
            .id();
        state.drivers.insert(id, entity);

        log::info!(
            "registered driver {} with id {} at {}",
            driver.name,
            id,
            position
        );
        state.emit(DispatchEvent::DriverRegistered {
            driver_id: id,
            name: driver.name.clone(),
            position,
        });
        DriverSnapshot {
            id,
            name: driver.name,
            position,
            available: true,
        }
    }

    /// Match the rider to the nearest available driver and start a ride.
    ///
    /// The chosen driver is reserved before the lock is released. The fare is
    /// priced once here from the straight-line pickup-to-dropoff distance.
    pub fn request_ride(
        &self,
        rider_id: RiderId,
        start: Point,
        destination: Point,
    ) -> Result<RideSnapshot, DispatchError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let rider_entity = *state
            .riders
            .get(&rider_id)
            .ok_or(DispatchError::RiderNotFound(rider_id))?;

        let driver_id = state.select_driver(start)?;
        let driver_entity = state.drivers[&driver_id];
        state.world.entity_mut(driver_entity).remove::<Available>();

        let distance = distance_between(start, destination);
        let fare = state.world.resource::<FarePolicy>().fare_for_distance(distance);
        let ride_id = state.next_ride_id;
        state.next_ride_id = ride_id.next();
        let ride = Ride {
            id: ride_id,
            rider: rider_entity,
            driver: driver_entity,
            pickup: start,
            dropoff: destination,
            distance,
            fare,
        };
        let ride_entity = state.world.spawn(ride).id();
        state.rides.insert(ride_id, ride_entity);

        let driver_name = state.driver_name(driver_entity);
        log::info!(
            "ride {} started with driver {}, fare {:.2}",
            ride_id,
            driver_name,
            fare
        );
        state.emit(DispatchEvent::RideStarted {
            ride_id,
            driver_name,
            fare,
        });

        Ok(RideSnapshot {
            id: ride_id,
            rider_id,
            driver_id,
            pickup: start,
            dropoff: destination,
            distance,
            fare,
            completed: false,
        })
    }

    /// Complete an active ride: the driver becomes available again at the dropoff point.
    pub fn complete_ride(&self, ride_id: RideId) -> Result<(), DispatchError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let ride_entity = *state
            .rides
            .get(&ride_id)
            .ok_or(DispatchError::RideNotFound(ride_id))?;
        if state.world.entity(ride_entity).contains::<Completed>() {
            return Err(DispatchError::RideAlreadyCompleted(ride_id));
        }
        let ride = *state
            .world
            .get::<Ride>(ride_entity)
            .ok_or(DispatchError::RideNotFound(ride_id))?;

        state.world.entity_mut(ride_entity).insert(Completed);
        debug_assert!(
            !state.world.entity(ride.driver).contains::<Available>(),
            "driver of an active ride must be unavailable"
        );
        state
            .world
            .entity_mut(ride.driver)
            .insert((Available, Position(ride.dropoff)));

        log::info!("ride {} completed, fare {:.2}", ride_id, ride.fare);
        state.emit(DispatchEvent::RideCompleted {
            ride_id,
            fare: ride.fare,
        });
        Ok(())
    }

    /// All rides in ascending id order.
    pub fn list_rides(&self) -> Vec<RideSummary> {
        let guard = self.lock();
        let world = &guard.world;

        guard
            .rides
            .iter()
            .filter_map(|(&ride_id, &entity)| {
                let snapshot = ride_snapshot(world, entity)?;
                let ride = world.get::<Ride>(entity)?;
                Some(RideSummary {
                    ride_id,
                    status: snapshot.status(),
                    rider_name: world.get::<Rider>(ride.rider)?.name.clone(),
                    driver_name: world.get::<Driver>(ride.driver)?.name.clone(),
                })
            })
            .collect()
    }

    pub fn rider(&self, id: RiderId) -> Option<Rider> {
        let guard = self.lock();
        let entity = *guard.riders.get(&id)?;
        guard.world.get::<Rider>(entity).cloned()
    }

    pub fn driver(&self, id: DriverId) -> Option<DriverSnapshot> {
        let guard = self.lock();
        let entity = *guard.drivers.get(&id)?;
        driver_snapshot(&guard.world, entity)
    }

    /// All drivers in ascending id order.
    pub fn drivers(&self) -> Vec<DriverSnapshot> {
        let guard = self.lock();
        guard
            .drivers
            .values()
            .filter_map(|&entity| driver_snapshot(&guard.world, entity))
            .collect()
    }

    pub fn ride(&self, id: RideId) -> Option<RideSnapshot> {
        let guard = self.lock();
        let entity = *guard.rides.get(&id)?;
        ride_snapshot(&guard.world, entity)
    }

    pub fn counts(&self) -> DispatchCounts {
        let guard = self.lock();
        let world = &guard.world;

        let drivers_available = guard
            .drivers
            .values()
            .filter(|&&entity| world.entity(entity).contains::<Available>())
            .count();
        let rides_completed = guard
            .rides
            .values()
            .filter(|&&entity| world.entity(entity).contains::<Completed>())
            .count();

        DispatchCounts {
            riders: guard.riders.len(),
            drivers_available,
            drivers_busy: guard.drivers.len() - drivers_available,
            rides_active: guard.rides.len() - rides_completed,
            rides_completed,
        }
    }

    /// Remove and return events emitted since the previous drain, oldest first.
    pub fn drain_events(&self) -> Vec<DispatchEvent> {
        self.lock().world.resource_mut::<DispatchEvents>().drain()
    }
}

impl DispatchState {
    fn emit(&mut self, event: DispatchEvent) {
        self.world.resource_mut::<DispatchEvents>().emit(event);
    }

    /// Available drivers with their positions, in ascending id order.
    fn available_drivers(&mut self) -> Vec<(DriverId, Point)> {
        let mut query = self
            .world
            .query_filtered::<(&Driver, &Position), With<Available>>();
        let mut candidates: Vec<(DriverId, Point)> = query
            .iter(&self.world)
            .map(|(driver, position)| (driver.id, position.0))
            .collect();
        candidates.sort_unstable_by_key(|(id, _)| *id);
        candidates
    }

    fn select_driver(&mut self, pickup: Point) -> Result<DriverId, DispatchError> {
        let candidates = self.available_drivers();
        let matching = self.world.resource::<MatchingAlgorithmResource>();
        let chosen = matching
            .find_match(pickup, &candidates)
            .ok_or(DispatchError::NoDriverAvailable)?;

        if !candidates.iter().any(|(id, _)| *id == chosen) {
            log::warn!(
                "{} picked driver {} which is not available; ignoring",
                matching.name(),
                chosen
            );
            return Err(DispatchError::NoDriverAvailable);
        }
        log::debug!(
            "{} matched pickup {} to driver {} out of {} candidates",
            matching.name(),
            pickup,
            chosen,
            candidates.len()
        );
        Ok(chosen)
    }

    fn driver_name(&self, entity: Entity) -> String {
        self.world
            .get::<Driver>(entity)
            .map(|driver| driver.name.clone())
            .unwrap_or_default()
    }
}

fn driver_snapshot(world: &World, entity: Entity) -> Option<DriverSnapshot> {
    let driver = world.get::<Driver>(entity)?;
    let position = world.get::<Position>(entity)?;
    Some(DriverSnapshot {
        id: driver.id,
        name: driver.name.clone(),
        position: position.0,
        available: world.entity(entity).contains::<Available>(),
    })
}

fn ride_snapshot(world: &World, entity: Entity) -> Option<RideSnapshot> {
    let ride = world.get::<Ride>(entity)?;
    Some(RideSnapshot {
        id: ride.id,
        rider_id: world.get::<Rider>(ride.rider)?.id,
        driver_id: world.get::<Driver>(ride.driver)?.id,
        pickup: ride.pickup,
        dropoff: ride.dropoff,
        distance: ride.distance,
        fare: ride.fare,
        completed: world.entity(entity).contains::<Completed>(),
    })
}
