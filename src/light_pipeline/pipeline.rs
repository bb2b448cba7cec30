//! Pipeline orchestration module
//!
//! This module drives the capture, reduce, smooth, encode, and send stages
//! at a fixed cadence until a cooperative stop is requested.

mod observer;
mod runner;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use observer::{StatusLineObserver, TickObserver};
pub use runner::AmbientPipeline;
pub use timing::{TickTimings, Timer};
pub use types::{PipelineConfig, PipelineConfigBuilder, StopHandle, TickReport};
