//! Shared application state

use crate::replay::RenderFrame;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tr_core::VehicleStore;

/// Handles shared between the watcher, the synthesizer and the display
#[derive(Clone)]
pub struct AppState {
    /// Canonical vehicle list
    pub store: Arc<dyn VehicleStore>,

    /// Broadcast channel for render frames; the display subscribes
    pub frames_tx: broadcast::Sender<RenderFrame>,

    /// Token for the currently watched vehicle's timers (None when
    /// nothing is displayed)
    pub watch_cancel: Arc<RwLock<Option<CancellationToken>>>,

    /// Serializes the synthesizer's read-modify-write cycles against
    /// the store. Synchronous flows (seeding, registration) run before
    /// the background timers start and do not take this guard.
    pub store_guard: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        let (frames_tx, _) = broadcast::channel(64);
        Self {
            store,
            frames_tx,
            watch_cancel: Arc::new(RwLock::new(None)),
            store_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Subscribe to render frames
    pub fn subscribe(&self) -> broadcast::Receiver<RenderFrame> {
        self.frames_tx.subscribe()
    }
}
