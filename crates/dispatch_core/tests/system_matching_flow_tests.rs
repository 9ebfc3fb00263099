mod support;

use dispatch_core::{DispatchError, DriverId, Point, RiderId};
use support::fleet::{origin, Fleet};

#[test]
fn nearest_available_driver_is_selected() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0), (10.0, 10.0)]);

    let ride = fleet
        .core
        .request_ride(fleet.rider, Point::new(1.0, 1.0), Point::new(5.0, 5.0))
        .expect("ride");

    assert_eq!(ride.driver_id, fleet.drivers[0]);
}

#[test]
fn nearest_wins_regardless_of_registration_order() {
    let fleet = Fleet::with_drivers_at(&[(10.0, 10.0), (0.0, 0.0)]);

    let ride = fleet
        .core
        .request_ride(fleet.rider, Point::new(1.0, 1.0), Point::new(5.0, 5.0))
        .expect("ride");

    assert_eq!(ride.driver_id, fleet.drivers[1]);
}

#[test]
fn equal_distance_tie_goes_to_first_registered_driver() {
    let fleet = Fleet::with_drivers_at(&[(3.0, 0.0), (-3.0, 0.0), (0.0, 3.0)]);

    let ride = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(1.0, 0.0))
        .expect("ride");

    assert_eq!(ride.driver_id, DriverId(1));
}

#[test]
fn tie_break_skips_busy_lower_id() {
    let fleet = Fleet::with_drivers_at(&[(3.0, 0.0), (-3.0, 0.0), (0.0, 3.0)]);
    let first = fleet
        .core
        .request_ride(fleet.rider, origin(), origin())
        .expect("first ride");
    let second = fleet
        .core
        .request_ride(fleet.rider, origin(), origin())
        .expect("second ride");

    assert_eq!(first.driver_id, DriverId(1));
    assert_eq!(second.driver_id, DriverId(2));
}

#[test]
fn assigned_driver_is_never_selected_while_ride_is_active() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0), (50.0, 50.0)]);

    let first = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(1.0, 0.0))
        .expect("first ride");
    assert!(!fleet.driver(first.driver_id).available);

    let second = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(1.0, 0.0))
        .expect("second ride");
    assert_ne!(second.driver_id, first.driver_id);
    assert_eq!(second.driver_id, fleet.drivers[1]);

    let third = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(1.0, 0.0));
    assert_eq!(third, Err(DispatchError::NoDriverAvailable));
}

#[test]
fn no_drivers_registered_reports_no_driver_available() {
    let fleet = Fleet::with_drivers_at(&[]);

    let result = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(1.0, 0.0));

    assert_eq!(result, Err(DispatchError::NoDriverAvailable));
    assert!(fleet.core.list_rides().is_empty());
}

#[test]
fn pickup_at_infinity_finds_no_driver() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0), (5.0, 5.0)]);
    let before = fleet.core.drivers();

    let result = fleet
        .core
        .request_ride(fleet.rider, Point::new(f64::INFINITY, 0.0), origin());

    assert_eq!(result, Err(DispatchError::NoDriverAvailable));
    assert_eq!(fleet.core.drivers(), before);
}

#[test]
fn unknown_rider_is_rejected_without_touching_drivers() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0), (2.0, 2.0)]);
    let before = fleet.core.drivers();

    let result = fleet
        .core
        .request_ride(RiderId(42), origin(), Point::new(1.0, 0.0));

    assert_eq!(result, Err(DispatchError::RiderNotFound(RiderId(42))));
    assert_eq!(fleet.core.drivers(), before);
    assert!(fleet.core.list_rides().is_empty());
}

#[test]
fn failed_request_does_not_consume_a_ride_id() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0)]);
    let _ = fleet
        .core
        .request_ride(RiderId(99), origin(), origin())
        .expect_err("unknown rider");

    let ride = fleet
        .core
        .request_ride(fleet.rider, origin(), origin())
        .expect("ride");
    assert_eq!(ride.id.get(), 1);
}

#[test]
fn completed_driver_is_matched_from_dropoff_position() {
    let fleet = Fleet::with_drivers_at(&[(0.0, 0.0), (20.0, 0.0)]);
    let ride = fleet
        .core
        .request_ride(fleet.rider, origin(), Point::new(30.0, 0.0))
        .expect("ride");
    assert_eq!(ride.driver_id, fleet.drivers[0]);
    fleet.core.complete_ride(ride.id).expect("complete");

    // Driver 1 now sits at (30, 0); driver 2 at (20, 0) is closer to (24, 0).
    let next = fleet
        .core
        .request_ride(fleet.rider, Point::new(24.0, 0.0), origin())
        .expect("next ride");
    assert_eq!(next.driver_id, fleet.drivers[1]);
    assert_eq!(fleet.available_drivers(), vec![fleet.drivers[0]]);
}
