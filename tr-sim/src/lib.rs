//! TraceRide Simulator Library
//!
//! Exposes the replay engine, watcher and synthesizer for integration
//! testing.

pub mod replay;
pub mod sinks;
pub mod state;
pub mod synthesis;
pub mod watcher;

pub use replay::{RenderFrame, RenderScene, ReplaySession, SessionError};
pub use state::AppState;
