//! Test helpers for common test setup and utilities.
//!
//! Shared by unit tests, integration tests and benchmarks so that fleets are
//! built the same way everywhere.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dispatcher::DispatchCore;
use crate::ecs::{DriverId, RiderId};
use crate::spatial::Point;

/// Side length of the square that seeded fleets are scattered over.
pub const TEST_AREA_SIZE: f64 = 100.0;

/// Register `count` drivers named `driver-N` at uniformly random points in
/// `[0, TEST_AREA_SIZE)²`. Same seed, same fleet.
pub fn seed_drivers(core: &DispatchCore, count: usize, seed: u64) -> Vec<DriverId> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let x = rng.gen_range(0.0..TEST_AREA_SIZE);
            let y = rng.gen_range(0.0..TEST_AREA_SIZE);
            core.register_driver(format!("driver-{i}"), x, y).id
        })
        .collect()
}

/// Register `count` riders named `rider-N`.
pub fn seed_riders(core: &DispatchCore, count: usize) -> Vec<RiderId> {
    (0..count)
        .map(|i| core.register_rider(format!("rider-{i}")).id)
        .collect()
}

/// A random point inside the test area.
pub fn random_point(rng: &mut StdRng) -> Point {
    Point::new(
        rng.gen_range(0.0..TEST_AREA_SIZE),
        rng.gen_range(0.0..TEST_AREA_SIZE),
    )
}
