//! Timer ownership for the currently displayed vehicle
//!
//! This module handles:
//! - Opening a replay session for the vehicle being displayed
//! - Driving the replay advance tick and the inactivity tick
//! - Publishing render frames on the broadcast channel
//! - Cancelling the previous vehicle's timers before starting new ones
//!
//! Both loops run on one cancellation token per watched vehicle, so
//! teardown is unconditional and a stale timer can never keep updating
//! a vehicle that is no longer displayed.

use crate::replay::{RenderFrame, ReplaySession};
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cadence of the replay advance tick
pub const ADVANCE_INTERVAL: Duration = Duration::from_secs(1);

/// Cadence of the inactivity check
pub const INACTIVITY_INTERVAL: Duration = Duration::from_secs(1);

/// Start watching a vehicle, cancelling any previous watch first.
///
/// Returns the token for this watch; cancelling it (directly or via
/// [`stop_watch`]) tears both timer loops down. Cancellation is
/// idempotent.
pub async fn watch(state: &AppState, vehicle_id: Uuid) -> CancellationToken {
    // Cancel-then-recreate: the previous vehicle's timers must be gone
    // before the new ones start
    let token = {
        let mut slot = state.watch_cancel.write().await;
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        token
    };

    let session = match ReplaySession::open(state.store.as_ref(), vehicle_id, Utc::now()) {
        Ok(session) => session,
        Err(e) => {
            warn!(%vehicle_id, "{e}");
            let _ = state.frames_tx.send(RenderFrame::NoData { vehicle_id });
            return token;
        }
    };

    info!(%vehicle_id, status = %session.status(), "watching vehicle");

    // First frame immediately so the display has something to draw
    let _ = state.frames_tx.send(session.frame());

    let session = Arc::new(RwLock::new(session));
    tokio::spawn(advance_loop(
        state.clone(),
        session.clone(),
        token.clone(),
    ));
    tokio::spawn(inactivity_loop(state.clone(), session, token.clone()));

    token
}

/// Cancel the current watch, if any. Safe to call repeatedly.
pub async fn stop_watch(state: &AppState) {
    let mut slot = state.watch_cancel.write().await;
    if let Some(token) = slot.take() {
        token.cancel();
    }
}

/// Replay advance tick: walk the history one fix per interval. Ends
/// when the vehicle parks or the replay reaches the last fix.
async fn advance_loop(
    state: AppState,
    session: Arc<RwLock<ReplaySession>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(ADVANCE_INTERVAL) => {}
        }

        let frame = {
            let mut session = session.write().await;
            match session.advance(Utc::now()) {
                Some(index) => {
                    debug!(
                        vehicle_id = %session.vehicle().id,
                        index,
                        "replay advanced"
                    );
                    Some(session.frame())
                }
                None => None,
            }
        };

        match frame {
            Some(frame) => {
                let _ = state.frames_tx.send(frame);
            }
            // Parked, or end of history: nothing further to animate
            None => break,
        }
    }
}

/// Inactivity tick: demote to parked after the threshold, publish the
/// final frame and self-cancel.
async fn inactivity_loop(
    state: AppState,
    session: Arc<RwLock<ReplaySession>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(INACTIVITY_INTERVAL) => {}
        }

        let mut session = session.write().await;
        if session.check_inactivity(Utc::now()) {
            info!(vehicle_id = %session.vehicle().id, "vehicle inactive, parking");
            let _ = state.frames_tx.send(session.frame());
            break;
        }
        if session.status() == tr_core::VehicleStatus::Parked {
            break;
        }
    }
}
