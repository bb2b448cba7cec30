//! Post-tick observation seam.
//!
//! Anything that wants to watch the pipeline (a status line, a preview
//! window) registers here. Observers see every fully completed tick and
//! never influence loop lifetime or cadence.

use tracing::info;

use crate::light_pipeline::color::Color;
use crate::light_pipeline::pipeline::types::TickReport;

pub trait TickObserver {
    fn on_tick(&mut self, report: &TickReport);
}

/// Logs the color sent on each tick.
#[derive(Debug, Default)]
pub struct StatusLineObserver;

impl TickObserver for StatusLineObserver {
    fn on_tick(&mut self, report: &TickReport) {
        let Color { r, g, b } = report.smoothed;
        info!("RGB: ({r}, {g}, {b})");
    }
}
