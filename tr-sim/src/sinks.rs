//! Display sinks
//!
//! The simulator does not render anything itself; it hands frames to a
//! display collaborator. Two sinks ship with the binary: a log display
//! for the terminal and an NDJSON file display.

use crate::replay::RenderFrame;
use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Consumer of render frames
pub trait DisplaySink: Send {
    fn render(&mut self, frame: &RenderFrame) -> Result<()>;
}

/// Drain a frame channel into a sink until the channel closes.
///
/// A lagging sink loses the overwritten frames, not the stream: on
/// `Lagged` the loop logs the gap and keeps receiving.
pub async fn drain_frames(mut rx: broadcast::Receiver<RenderFrame>, sink: &mut dyn DisplaySink) {
    use broadcast::error::RecvError;
    loop {
        match rx.recv().await {
            Ok(frame) => {
                if let Err(e) = sink.render(&frame) {
                    warn!("display error: {e}");
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "display lagging, frames dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Renders frames as log lines
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        match frame {
            RenderFrame::NoData { vehicle_id } => {
                info!(%vehicle_id, "no location registered");
            }
            RenderFrame::Scene(scene) => {
                info!(
                    vehicle = %scene.name,
                    plate = %scene.plate,
                    status = %scene.status,
                    latitude = scene.position.latitude,
                    longitude = scene.position.longitude,
                    progress = %format!("{}/{}", scene.progress.0, scene.progress.1),
                    "position update"
                );
            }
        }
        Ok(())
    }
}

/// Appends one JSON frame per line
pub struct NdjsonDisplay {
    file: std::fs::File,
}

impl NdjsonDisplay {
    pub fn new(path: String) -> Result<Self> {
        use std::fs::OpenOptions;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl DisplaySink for NdjsonDisplay {
    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        use std::io::Write;
        let json = serde_json::to_string(frame)?;
        writeln!(self.file, "{}", json)?;
        Ok(())
    }
}
