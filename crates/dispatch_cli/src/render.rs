//! Human-readable text for core events, failures and ride listings.

use dispatch_core::{DispatchError, DispatchEvent, RideSummary};

pub fn render_event(event: &DispatchEvent) -> String {
    match event {
        DispatchEvent::RiderRegistered { rider_id, name } => {
            format!("Registered rider {name} with ID {rider_id}")
        }
        DispatchEvent::DriverRegistered {
            driver_id,
            name,
            position,
        } => format!("Registered driver {name} with ID {driver_id} at location {position}"),
        DispatchEvent::RideStarted {
            ride_id,
            driver_name,
            fare,
        } => format!("Ride {ride_id} started with driver {driver_name}. Fare will be {fare:.2}"),
        DispatchEvent::RideCompleted { ride_id, fare } => {
            format!("Ride {ride_id} completed. Fare was {fare:.2}")
        }
    }
}

pub fn render_error(error: &DispatchError) -> String {
    match error {
        DispatchError::RiderNotFound(id) => format!("Rider not found (ID {id})"),
        DispatchError::NoDriverAvailable => "No available drivers".to_string(),
        DispatchError::RideNotFound(id) => format!("Ride not found (ID {id})"),
        DispatchError::RideAlreadyCompleted(id) => format!("Ride {id} already completed"),
    }
}

pub fn render_ride_summary(row: &RideSummary) -> String {
    format!(
        "Ride {} ({}): Rider {} -> Driver {}",
        row.ride_id, row.status, row.rider_name, row.driver_name
    )
}
