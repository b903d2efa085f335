//! Status derivation
//!
//! `Moving -> Parked` is the only transition the simulator performs,
//! and it is a pure function of elapsed time since the last observed
//! update. `Parked -> Moving` only happens through external action
//! (re-registration or an explicit edit), never here.

use crate::model::VehicleStatus;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A vehicle with no update for longer than this is considered parked
pub const INACTIVITY_THRESHOLD: Duration = Duration::from_secs(30);

/// Derive the status from the last observed update time.
///
/// Returns `Parked` when strictly more than `threshold` has elapsed
/// between `last_update` and `now`. A `last_update` in the future
/// (clock skew in persisted data) counts as zero elapsed time.
pub fn derive_status(
    last_update: DateTime<Utc>,
    now: DateTime<Utc>,
    threshold: Duration,
) -> VehicleStatus {
    let elapsed = (now - last_update).to_std().unwrap_or(Duration::ZERO);
    if elapsed > threshold {
        VehicleStatus::Parked
    } else {
        VehicleStatus::Moving
    }
}
