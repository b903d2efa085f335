//! Background fix synthesis
//!
//! Simulates tracker chips periodically phoning in a new GPS fix: on a
//! slow cadence, every moving vehicle gets one new coordinate derived
//! from its latest fix plus a small uniform jitter. History is bounded
//! so the stored blob never grows without limit. Demo vehicles are
//! immutable and skipped.

use crate::state::AppState;
use chrono::{DateTime, Utc};
use rand::Rng;
use tr_core::{LatLng, Vehicle, VehicleStatus};
use tracing::{debug, error};

/// Cadence of the synthesis pass
pub const SYNTHESIS_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Maximum jitter applied to each axis of a synthesized fix, in degrees
pub const JITTER_DEGREES: f64 = 0.005;

/// Fixes kept per vehicle; older fixes are dropped
pub const MAX_HISTORY: usize = 10;

/// Main synthesis loop
pub async fn run(state: AppState) {
    loop {
        tokio::time::sleep(SYNTHESIS_INTERVAL).await;
        if let Err(e) = synthesis_cycle(&state).await {
            error!("error in synthesis cycle: {e}");
        }
    }
}

/// One pass: read the full list, append a fix to every moving vehicle,
/// persist. Runs under the store guard so it cannot interleave with
/// another writer.
pub async fn synthesis_cycle(state: &AppState) -> anyhow::Result<()> {
    let _guard = state.store_guard.lock().await;

    let mut vehicles = state.store.get_all();
    let changed = synthesize_fixes(&mut vehicles, Utc::now(), &mut rand::thread_rng());
    if changed {
        state.store.set_all(&vehicles)?;
    }
    Ok(())
}

/// Append one jittered fix to every moving, non-demo vehicle and bound
/// each history to [`MAX_HISTORY`]. Returns whether anything changed.
pub fn synthesize_fixes<R: Rng>(
    vehicles: &mut [Vehicle],
    now: DateTime<Utc>,
    rng: &mut R,
) -> bool {
    let mut changed = false;

    for vehicle in vehicles.iter_mut() {
        if vehicle.demo || vehicle.status != VehicleStatus::Moving {
            continue;
        }
        let Some(last) = vehicle.last_location() else {
            continue;
        };

        let next = perturb(last, now, rng);
        debug!(
            vehicle_id = %vehicle.id,
            latitude = next.latitude,
            longitude = next.longitude,
            "synthesized fix"
        );
        vehicle.locations.push(next);

        if vehicle.locations.len() > MAX_HISTORY {
            let excess = vehicle.locations.len() - MAX_HISTORY;
            vehicle.locations.drain(..excess);
        }
        changed = true;
    }

    changed
}

/// A new fix near the previous one, stamped with the current time
fn perturb<R: Rng>(last: &LatLng, now: DateTime<Utc>, rng: &mut R) -> LatLng {
    LatLng::new(
        last.latitude + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
        last.longitude + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES),
        now,
    )
}
