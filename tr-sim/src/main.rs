//! TraceRide tracker
//!
//! Headless runner: seeds the on-device store, starts the background
//! synthesizer, watches the first vehicle on the list and renders its
//! replay to the log until Ctrl-C.

use anyhow::Result;
use std::sync::Arc;
use tr_sim::sinks::LogDisplay;
use tr_sim::{sinks, state, synthesis, watcher};
use tr_store::{seed, JsonVehicleStore, KvStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting TraceRide tracker");

    let kv = KvStore::open(KvStore::default_path("traceride.json"));
    info!(path = %kv.path().display(), "opening store");
    let store = Arc::new(JsonVehicleStore::new(kv));

    seed::install_demo_data(store.as_ref())?;

    let state = state::AppState::new(store);

    // Background fix synthesis for all moving vehicles
    tokio::spawn(synthesis::run(state.clone()));

    // Drain frames into the log display
    let rx = state.subscribe();
    tokio::spawn(async move {
        let mut display = LogDisplay;
        sinks::drain_frames(rx, &mut display).await;
    });

    // Watch the first vehicle on the list
    match state.store.get_all().first() {
        Some(vehicle) => {
            watcher::watch(&state, vehicle.id).await;
        }
        None => warn!("no vehicles registered"),
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    watcher::stop_watch(&state).await;

    Ok(())
}
