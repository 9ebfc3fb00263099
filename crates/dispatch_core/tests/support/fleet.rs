use dispatch_core::{DispatchCore, DriverId, DriverSnapshot, Point, RiderId};

/// Seeded origin shared by most scenarios.
pub fn origin() -> Point {
    Point::new(0.0, 0.0)
}

/// Core with one rider and drivers at the given positions, registered in order.
pub struct Fleet {
    pub core: DispatchCore,
    pub rider: RiderId,
    pub drivers: Vec<DriverId>,
}

impl Fleet {
    pub fn with_drivers_at(positions: &[(f64, f64)]) -> Self {
        let core = DispatchCore::new();
        let rider = core.register_rider("rider").id;
        let drivers = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| core.register_driver(format!("driver-{}", i + 1), x, y).id)
            .collect();
        Self {
            core,
            rider,
            drivers,
        }
    }

    pub fn driver(&self, id: DriverId) -> DriverSnapshot {
        self.core.driver(id).expect("registered driver")
    }

    pub fn available_drivers(&self) -> Vec<DriverId> {
        self.core
            .drivers()
            .into_iter()
            .filter(|driver| driver.available)
            .map(|driver| driver.id)
            .collect()
    }
}
