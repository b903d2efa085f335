//! Replay session for one displayed vehicle
//!
//! Translates a stored location history into the position to render
//! right now. The replay walks the history at a fixed step rate,
//! independent of the real spacing between recorded timestamps, and
//! demotes the vehicle to parked after the inactivity window.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tr_core::{derive_status, LatLng, Vehicle, VehicleStatus, VehicleStore, INACTIVITY_THRESHOLD};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Vehicle absent from the store, or present with no history
    #[error("no location registered for vehicle {0}")]
    NotFound(Uuid),
}

/// Transient per-vehicle replay state. Not persisted; the replay
/// position resets to the start of the history on every load.
pub struct ReplaySession {
    vehicle: Vehicle,
    current_index: usize,
    last_update: DateTime<Utc>,
}

impl ReplaySession {
    /// Load a vehicle from the store and start a session at the
    /// beginning of its history.
    pub fn open(
        store: &dyn VehicleStore,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let vehicle = store.find(id).ok_or(SessionError::NotFound(id))?;
        Self::new(vehicle, now)
    }

    /// Start a session over an already-loaded vehicle.
    ///
    /// The persisted status flag is advisory; the effective status is
    /// re-derived from the capture time of the last fix.
    pub fn new(mut vehicle: Vehicle, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let last_seen = vehicle.last_seen().ok_or(SessionError::NotFound(vehicle.id))?;

        if vehicle.status == VehicleStatus::Moving {
            vehicle.status = derive_status(last_seen, now, INACTIVITY_THRESHOLD);
        }

        Ok(Self {
            vehicle,
            current_index: 0,
            last_update: now,
        })
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn status(&self) -> VehicleStatus {
        self.vehicle.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// Replay tick: step one fix further into the history.
    ///
    /// Returns the new index, or `None` when parked or already at the
    /// last fix (the replay never wraps).
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<usize> {
        if self.vehicle.status == VehicleStatus::Parked {
            return None;
        }
        if self.current_index >= self.vehicle.locations.len().saturating_sub(1) {
            return None;
        }

        self.current_index += 1;
        self.last_update = now;
        Some(self.current_index)
    }

    /// Inactivity tick: demote to parked when no advance has been
    /// observed for longer than the threshold.
    ///
    /// Returns `true` only on the tick that performs the transition;
    /// once parked, further ticks are no-ops.
    pub fn check_inactivity(&mut self, now: DateTime<Utc>) -> bool {
        if self.vehicle.status == VehicleStatus::Parked {
            return false;
        }

        if derive_status(self.last_update, now, INACTIVITY_THRESHOLD) == VehicleStatus::Parked {
            self.vehicle.status = VehicleStatus::Parked;
            return true;
        }
        false
    }

    /// What the display should draw right now.
    ///
    /// Parked: the vehicle sits at its final known point and the full
    /// history is shown as waypoints. Moving: the walked-so-far prefix
    /// only; fixes past the replay position are never revealed.
    pub fn frame(&self) -> RenderFrame {
        let locations = &self.vehicle.locations;

        let scene = match self.vehicle.status {
            VehicleStatus::Parked => RenderScene {
                vehicle_id: self.vehicle.id,
                name: self.vehicle.name.clone(),
                plate: self.vehicle.plate.clone(),
                status: VehicleStatus::Parked,
                position: locations[locations.len() - 1].clone(),
                path: locations.clone(),
                waypoints: locations.clone(),
                progress: (locations.len(), locations.len()),
            },
            VehicleStatus::Moving => RenderScene {
                vehicle_id: self.vehicle.id,
                name: self.vehicle.name.clone(),
                plate: self.vehicle.plate.clone(),
                status: VehicleStatus::Moving,
                position: locations[self.current_index].clone(),
                path: locations[..=self.current_index].to_vec(),
                waypoints: Vec::new(),
                progress: (self.current_index + 1, locations.len()),
            },
        };

        RenderFrame::Scene(scene)
    }
}

/// One update for the display collaborator
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderFrame {
    /// Explicit empty state: vehicle missing or without history
    NoData { vehicle_id: Uuid },
    Scene(RenderScene),
}

/// Map content plus the info panel fields
#[derive(Debug, Clone, Serialize)]
pub struct RenderScene {
    pub vehicle_id: Uuid,
    pub name: String,
    pub plate: String,
    pub status: VehicleStatus,
    /// Marker position
    pub position: LatLng,
    /// Polyline of the walked path
    pub path: Vec<LatLng>,
    /// Per-fix markers, populated only when parked
    pub waypoints: Vec<LatLng>,
    /// (fixes shown, fixes total)
    pub progress: (usize, usize),
}
