//! Pipeline orchestration types

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::light_pipeline::artnet::packet::MAX_CHANNEL_OFFSET;
use crate::light_pipeline::capture::types::CaptureRegion;
use crate::light_pipeline::color::types::{Color, ReduceConfig};
use crate::light_pipeline::common::error::{PipelineError, Result};
use crate::light_pipeline::pipeline::timing::TickTimings;

/// Cooperative stop flag, polled once per tick boundary
pub type StopHandle = Arc<AtomicBool>;

/// Everything the loop needs besides its frame source and transmitter
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Centered region to sample each tick
    pub region: CaptureRegion,
    /// Frame-to-color reduction settings
    pub reduce: ReduceConfig,
    /// Smoothing factor in (0, 1]; 1.0 disables smoothing
    pub smoothing_factor: f32,
    /// First DMX channel of the RGB triple, 0-based
    pub channel_offset: u16,
    /// Time between the start of one tick and the next
    pub tick_interval: Duration,
    /// Consecutive capture failures tolerated before the run gives up;
    /// 0 retries forever
    pub max_consecutive_capture_failures: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: CaptureRegion {
                surface_index: 0,
                width: 800,
                height: 800,
            },
            reduce: ReduceConfig::default(),
            smoothing_factor: 0.1,
            channel_offset: 1,
            tick_interval: Duration::from_millis(100),
            max_consecutive_capture_failures: 10,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    region: Option<CaptureRegion>,
    reduce: Option<ReduceConfig>,
    smoothing_factor: Option<f32>,
    channel_offset: Option<u16>,
    tick_interval: Option<Duration>,
    max_consecutive_capture_failures: Option<u32>,
}

impl PipelineConfigBuilder {
    pub fn region(mut self, region: CaptureRegion) -> Self {
        self.region = Some(region);
        self
    }

    pub fn reduce(mut self, reduce: ReduceConfig) -> Self {
        self.reduce = Some(reduce);
        self
    }

    pub fn smoothing_factor(mut self, factor: f32) -> Self {
        self.smoothing_factor = Some(factor);
        self
    }

    pub fn channel_offset(mut self, offset: u16) -> Self {
        self.channel_offset = Some(offset);
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = Some(interval);
        self
    }

    pub fn max_consecutive_capture_failures(mut self, count: u32) -> Self {
        self.max_consecutive_capture_failures = Some(count);
        self
    }

    pub fn build(self) -> Result<PipelineConfig> {
        let default = PipelineConfig::default();
        let config = PipelineConfig {
            region: self.region.unwrap_or(default.region),
            reduce: self.reduce.unwrap_or(default.reduce),
            smoothing_factor: self.smoothing_factor.unwrap_or(default.smoothing_factor),
            channel_offset: self.channel_offset.unwrap_or(default.channel_offset),
            tick_interval: self.tick_interval.unwrap_or(default.tick_interval),
            max_consecutive_capture_failures: self
                .max_consecutive_capture_failures
                .unwrap_or(default.max_consecutive_capture_failures),
        };

        if config.channel_offset > MAX_CHANNEL_OFFSET {
            return Err(PipelineError::InvalidChannelOffset(config.channel_offset));
        }
        if config.tick_interval.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "tick interval must be non-zero".to_string(),
            ));
        }

        Ok(config)
    }
}

/// What one fully completed tick produced
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Reduced color straight out of the frame
    pub raw: Color,
    /// Color actually written to the universe, after smoothing
    pub smoothed: Color,
    /// Stage durations for this tick
    pub timings: TickTimings,
}
