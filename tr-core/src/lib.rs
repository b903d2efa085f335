//! TraceRide Core Library
//!
//! This crate provides the vehicle data model, defensive coordinate
//! parsing, status derivation and the store traits shared by the
//! storage collaborators and the motion simulator.

pub mod coords;
pub mod model;
pub mod status;
pub mod store;

pub use model::{LatLng, UserRecord, Vehicle, VehicleStatus};
pub use status::{derive_status, INACTIVITY_THRESHOLD};
pub use store::{CredentialStore, VehicleStore};
