//! Vehicle list persistence
//!
//! Stores the full vehicle list as one JSON array under a well-known
//! key, the way the mobile app kept it in device storage.

use crate::kv::KvStore;
use anyhow::Result;
use tr_core::{Vehicle, VehicleStore};
use tracing::warn;

const VEHICLES_KEY: &str = "vehicles";

pub struct JsonVehicleStore {
    kv: KvStore,
}

impl JsonVehicleStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

impl VehicleStore for JsonVehicleStore {
    fn get_all(&self) -> Vec<Vehicle> {
        let Some(value) = self.kv.get(VEHICLES_KEY) else {
            return Vec::new();
        };

        match serde_json::from_value::<Vec<Vehicle>>(value) {
            Ok(vehicles) => vehicles,
            Err(e) => {
                warn!(error = %e, "stored vehicle list unparsable, treating as empty");
                Vec::new()
            }
        }
    }

    fn set_all(&self, vehicles: &[Vehicle]) -> Result<()> {
        self.kv.set(VEHICLES_KEY, serde_json::to_value(vehicles)?)
    }
}
