//! Built-in demo vehicles
//!
//! Two vehicles shipped with the app so a fresh install has something
//! to show: a car mid-drive through São Paulo and a parked motorcycle.
//! Both carry the `demo` flag, which keeps the background synthesizer
//! from appending fixes to them.

use chrono::{DateTime, Duration, Utc};
use tr_core::{LatLng, Vehicle, VehicleStatus, VehicleStore};
use tracing::info;
use uuid::Uuid;

/// The demo route of the moving car: (latitude, longitude, seconds ago)
const ARGO_ROUTE: [(f64, f64, i64); 8] = [
    (-23.561399, -46.656505, 35),
    (-23.561200, -46.655900, 30),
    (-23.560800, -46.654700, 25),
    (-23.558621, -46.653812, 20),
    (-23.557300, -46.652900, 15),
    (-23.545847, -46.643889, 10),
    (-23.544460, -46.638860, 5),
    (-23.550516, -46.633324, 0),
];

pub fn demo_vehicles(now: DateTime<Utc>) -> Vec<Vehicle> {
    let argo_locations = ARGO_ROUTE
        .iter()
        .map(|&(lat, lng, ago)| LatLng::new(lat, lng, now - Duration::seconds(ago)))
        .collect();

    vec![
        Vehicle {
            id: Uuid::new_v4(),
            name: "Fiat Argo".to_string(),
            plate: "ABC-1234".to_string(),
            brand: "Fiat".to_string(),
            model: "Argo".to_string(),
            color: "Silver".to_string(),
            year: 2021,
            chip_code: "CHIP-0001".to_string(),
            status: VehicleStatus::Moving,
            locations: argo_locations,
            demo: true,
        },
        Vehicle {
            id: Uuid::new_v4(),
            name: "Honda CB 500".to_string(),
            plate: "MOT-9876".to_string(),
            brand: "Honda".to_string(),
            model: "CB 500".to_string(),
            color: "Black".to_string(),
            year: 2019,
            chip_code: "CHIP-0002".to_string(),
            status: VehicleStatus::Parked,
            locations: vec![
                LatLng::new(-23.5605, -46.6433, now - Duration::seconds(60)),
                LatLng::new(-23.5615, -46.6443, now - Duration::seconds(30)),
            ],
            demo: true,
        },
    ]
}

/// Install the demo vehicles when the store is empty. Idempotent.
pub fn install_demo_data(store: &dyn VehicleStore) -> anyhow::Result<()> {
    if !store.get_all().is_empty() {
        return Ok(());
    }

    let vehicles = demo_vehicles(Utc::now());
    info!(count = vehicles.len(), "seeding demo vehicles");
    store.set_all(&vehicles)
}
