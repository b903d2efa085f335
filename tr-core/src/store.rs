//! Store trait definitions
//!
//! The vehicle list and the user record live behind these seams so the
//! simulator never talks to the filesystem directly. Every write
//! replaces the entire stored list; there are no per-record keys and
//! no transactions.

use crate::model::{UserRecord, Vehicle};
use anyhow::Result;
use uuid::Uuid;

/// Canonical owner of the vehicle list
///
/// Reads fail soft: a missing or unparsable blob is reported as an
/// empty list, never an error. Mutation is read-full-list -> modify ->
/// write-full-list; callers serialize their read/modify/write cycles.
pub trait VehicleStore: Send + Sync {
    /// Load the full vehicle list (empty on missing or malformed data)
    fn get_all(&self) -> Vec<Vehicle>;

    /// Replace the full vehicle list
    fn set_all(&self, vehicles: &[Vehicle]) -> Result<()>;

    /// Find one vehicle by id
    fn find(&self, id: Uuid) -> Option<Vehicle> {
        self.get_all().into_iter().find(|v| v.id == id)
    }

    /// Remove a vehicle by id. Removing an unknown id is a no-op.
    fn remove(&self, id: Uuid) -> Result<()> {
        let mut vehicles = self.get_all();
        vehicles.retain(|v| v.id != id);
        self.set_all(&vehicles)
    }
}

/// Holds the single registered user record
pub trait CredentialStore: Send + Sync {
    /// Load the registered user, if any (missing or malformed -> None)
    fn load(&self) -> Option<UserRecord>;

    /// Replace the registered user
    fn save(&self, user: &UserRecord) -> Result<()>;
}
