//! Vehicle tracking data model
//!
//! Defines the records persisted in the on-device key-value store: the
//! vehicle list and the single registered user. Coordinate fields
//! deserialize leniently (see [`crate::coords`]) because the stored
//! JSON has historically been inconsistently typed.

use crate::coords;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single GPS fix. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default, deserialize_with = "coords::lenient_f64")]
    pub latitude: f64,

    #[serde(default, deserialize_with = "coords::lenient_f64")]
    pub longitude: f64,

    /// Capture time of the fix
    #[serde(
        default = "coords::epoch",
        deserialize_with = "coords::lenient_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }
}

/// Vehicle movement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Moving,
    Parked,
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleStatus::Moving => write!(f, "moving"),
            VehicleStatus::Parked => write!(f, "parked"),
        }
    }
}

/// A tracked vehicle and its location history
///
/// `locations` is ordered by capture time and is never empty for a
/// vehicle that completed registration. The persisted `status` is
/// advisory: the simulator re-derives it from the last fix on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: u16,
    pub chip_code: String,
    pub status: VehicleStatus,

    #[serde(default)]
    pub locations: Vec<LatLng>,

    /// Seed vehicles shipped with the app; excluded from synthesis
    #[serde(default)]
    pub demo: bool,
}

impl Vehicle {
    /// Latest recorded fix, if any
    pub fn last_location(&self) -> Option<&LatLng> {
        self.locations.last()
    }

    /// Capture time of the latest fix
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_location().map(|loc| loc.timestamp)
    }
}

/// The single registered user
///
/// Password is compared by plain equality and stored as-is, matching
/// the reference app's behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub national_id: String,
    pub password: String,
}
