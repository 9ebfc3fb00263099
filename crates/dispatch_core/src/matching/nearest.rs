use crate::ecs::DriverId;
use crate::spatial::{distance_between, Point};

use super::algorithm::MatchingAlgorithm;

/// Nearest-available matching: the driver with the smallest straight-line
/// distance to the pickup wins.
///
/// Candidates are scanned once in the order given. A later candidate replaces
/// the current best only when it is strictly closer, so among equal distances
/// the first-encountered (lowest id) driver is kept. A non-finite distance
/// (NaN or infinite) never wins.
///
/// Time complexity: O(n) in the number of available drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestAvailable;

impl MatchingAlgorithm for NearestAvailable {
    fn find_match(
        &self,
        pickup: Point,
        available_drivers: &[(DriverId, Point)],
    ) -> Option<DriverId> {
        let mut best_match: Option<(DriverId, f64)> = None;

        for (driver_id, driver_pos) in available_drivers {
            let distance = distance_between(pickup, *driver_pos);
            if !distance.is_finite() {
                continue;
            }
            match best_match {
                None => best_match = Some((*driver_id, distance)),
                Some((_, best_distance)) if distance < best_distance => {
                    best_match = Some((*driver_id, distance))
                }
                _ => {}
            }
        }

        best_match.map(|(driver_id, _)| driver_id)
    }

    fn name(&self) -> &'static str {
        "nearest_available"
    }
}
