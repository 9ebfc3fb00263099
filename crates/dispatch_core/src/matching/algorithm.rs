use crate::ecs::DriverId;
use crate::spatial::Point;

/// Trait for matching algorithms that pick a driver for a ride request.
///
/// The core hands the algorithm every currently available driver and applies
/// the returned choice inside the same critical section, so an algorithm never
/// has to worry about a candidate being booked underneath it.
///
/// # Examples
///
/// ```rust
/// use dispatch_core::ecs::DriverId;
/// use dispatch_core::matching::{MatchingAlgorithm, NearestAvailable};
/// use dispatch_core::spatial::Point;
///
/// let algorithm = NearestAvailable;
/// let driver = algorithm.find_match(
///     Point::new(1.0, 1.0),
///     &[
///         (DriverId(1), Point::new(0.0, 0.0)),
///         (DriverId(2), Point::new(10.0, 10.0)),
///     ],
/// );
/// assert_eq!(driver, Some(DriverId(1)));
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Find a driver for a single pickup point.
    ///
    /// # Arguments
    ///
    /// * `pickup` - Where the rider wants to be picked up
    /// * `available_drivers` - `(driver_id, driver_position)` for every available
    ///   driver, in ascending id (registration) order
    ///
    /// # Returns
    ///
    /// `Some(driver_id)` for the chosen driver, `None` if nobody can take the ride.
    fn find_match(
        &self,
        pickup: Point,
        available_drivers: &[(DriverId, Point)],
    ) -> Option<DriverId>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}
