//! Vehicle registration flow
//!
//! Validates a registration form, builds the new vehicle record with
//! its initial location history and persists the updated list. A
//! rejected form never touches the store.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use thiserror::Error;
use tr_core::{LatLng, Vehicle, VehicleStatus, VehicleStore};
use uuid::Uuid;

/// Lower bound for an acceptable model year
const MIN_YEAR: u16 = 1900;

/// Number of fixes pre-generated for a vehicle registered parked
const PARKED_PATH_LEN: usize = 3;

/// Spread of the pre-generated parked path, in degrees
const PARKED_PATH_JITTER: f64 = 0.005;

/// Registration form for a new vehicle
#[derive(Debug, Clone)]
pub struct VehicleDraft {
    pub name: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    /// Model year as typed into the form
    pub year: String,
    pub chip_code: String,
    pub status: VehicleStatus,
    /// Position of the tracker chip at registration time
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("year is not a number: {0:?}")]
    InvalidYear(String),

    #[error("year {0} must be between 1900 and the current year")]
    YearOutOfRange(u16),

    #[error("plate {0:?} is already registered")]
    DuplicatePlate(String),
}

/// Validate the draft against the existing list and build the record.
///
/// Pure: no store access, so the checks are testable in isolation.
/// Plate uniqueness is a case-sensitive exact match.
pub fn build_vehicle(
    draft: &VehicleDraft,
    existing: &[Vehicle],
    now: DateTime<Utc>,
) -> Result<Vehicle, RegistrationError> {
    for (field, value) in [
        ("name", &draft.name),
        ("plate", &draft.plate),
        ("brand", &draft.brand),
        ("model", &draft.model),
        ("color", &draft.color),
        ("year", &draft.year),
        ("chip_code", &draft.chip_code),
    ] {
        if value.trim().is_empty() {
            return Err(RegistrationError::MissingField(field));
        }
    }

    let year: u16 = draft
        .year
        .trim()
        .parse()
        .map_err(|_| RegistrationError::InvalidYear(draft.year.clone()))?;
    let current_year = now.year() as u16;
    if year < MIN_YEAR || year > current_year {
        return Err(RegistrationError::YearOutOfRange(year));
    }

    if existing.iter().any(|v| v.plate == draft.plate) {
        return Err(RegistrationError::DuplicatePlate(draft.plate.clone()));
    }

    Ok(Vehicle {
        id: Uuid::new_v4(),
        name: draft.name.clone(),
        plate: draft.plate.clone(),
        brand: draft.brand.clone(),
        model: draft.model.clone(),
        color: draft.color.clone(),
        year,
        chip_code: draft.chip_code.clone(),
        status: draft.status,
        locations: initial_locations(draft, now),
        demo: false,
    })
}

/// Initial history: one seed fix when starting out moving, a short
/// random walk around the seed when registered parked.
fn initial_locations(draft: &VehicleDraft, now: DateTime<Utc>) -> Vec<LatLng> {
    let seed = LatLng::new(draft.latitude, draft.longitude, now);
    match draft.status {
        VehicleStatus::Moving => vec![seed],
        VehicleStatus::Parked => {
            let mut rng = rand::thread_rng();
            let mut path: Vec<LatLng> = (1..PARKED_PATH_LEN)
                .rev()
                .map(|steps_back| {
                    LatLng::new(
                        draft.latitude + rng.gen_range(-PARKED_PATH_JITTER..=PARKED_PATH_JITTER),
                        draft.longitude + rng.gen_range(-PARKED_PATH_JITTER..=PARKED_PATH_JITTER),
                        now - chrono::Duration::seconds(60 * steps_back as i64),
                    )
                })
                .collect();
            path.push(seed);
            path
        }
    }
}

/// Register a new vehicle: validate, append to the list, persist.
pub fn register_vehicle(
    store: &dyn VehicleStore,
    draft: &VehicleDraft,
    now: DateTime<Utc>,
) -> anyhow::Result<Vehicle> {
    let mut vehicles = store.get_all();
    let vehicle = build_vehicle(draft, &vehicles, now)?;
    vehicles.push(vehicle.clone());
    store.set_all(&vehicles)?;
    Ok(vehicle)
}
