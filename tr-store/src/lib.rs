//! On-device storage collaborators for TraceRide

pub mod credentials;
pub mod kv;
pub mod registration;
pub mod seed;
pub mod vehicles;

pub use credentials::{login, register_user, JsonCredentialStore, LoginError, SignupForm};
pub use kv::KvStore;
pub use registration::{register_vehicle, RegistrationError, VehicleDraft};
pub use vehicles::JsonVehicleStore;
