//! The capture-to-light loop.

use std::fmt;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::light_pipeline::{
    artnet::{self, Destination, DmxUniverse, Transmitter, UdpTransmitter},
    capture::{FrameSource, XcapFrameSource},
    color::ColorReducer,
    common::error::{PipelineError, Result},
    pipeline::observer::TickObserver,
    pipeline::timing::{TickTimings, Timer},
    pipeline::types::{PipelineConfig, StopHandle, TickReport},
    smoothing::{SmoothingState, TemporalSmoother},
};

/// Drives one light from one display region.
///
/// Ticks run strictly sequentially on the calling thread: a frame is
/// captured, reduced to a color, smoothed against the previous output, and
/// sent as an ArtDmx datagram, then the loop sleeps out the remainder of the
/// tick interval.
pub struct AmbientPipeline<S: FrameSource, T: Transmitter> {
    source: S,
    transmitter: T,
    reducer: ColorReducer,
    smoother: TemporalSmoother,
    state: SmoothingState,
    config: PipelineConfig,
    observers: Vec<Box<dyn TickObserver>>,
}

impl<S: FrameSource, T: Transmitter> fmt::Debug for AmbientPipeline<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AmbientPipeline<XcapFrameSource, UdpTransmitter> {
    /// Pipeline over the real screen, transmitting to `destination`.
    pub fn new(config: PipelineConfig, destination: &Destination) -> Result<Self> {
        Self::with_parts(XcapFrameSource, UdpTransmitter::new(destination)?, config)
    }
}

impl<S: FrameSource, T: Transmitter> AmbientPipeline<S, T> {
    /// Pipeline over caller-supplied capture and transmission backends.
    pub fn with_parts(source: S, transmitter: T, config: PipelineConfig) -> Result<Self> {
        let smoother = TemporalSmoother::new(config.smoothing_factor)?;
        if config.channel_offset > artnet::packet::MAX_CHANNEL_OFFSET {
            return Err(PipelineError::InvalidChannelOffset(config.channel_offset));
        }

        Ok(Self {
            source,
            transmitter,
            reducer: ColorReducer::new(config.reduce.clone()),
            smoother,
            state: SmoothingState::new(),
            config,
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn TickObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs one full capture → reduce → smooth → encode → send pass.
    pub fn tick(&mut self) -> Result<TickReport> {
        let mut timings = TickTimings::default();

        let timer = Timer::start();
        let frame = self.source.capture(&self.config.region)?;
        timings.capture = timer.stop();

        let timer = Timer::start();
        let raw = self.reducer.reduce(&frame);
        timings.reduce = timer.stop();

        let timer = Timer::start();
        let smoothed = self.smoother.smooth(&mut self.state, raw);
        timings.smooth = timer.stop();

        let timer = Timer::start();
        let universe = DmxUniverse::with_rgb(self.config.channel_offset, smoothed)?;
        let packet = artnet::packet::encode(&universe);
        timings.encode = timer.stop();

        let timer = Timer::start();
        self.transmitter.send(&packet)?;
        timings.send = timer.stop();

        Ok(TickReport {
            raw,
            smoothed,
            timings,
        })
    }

    /// Ticks at the configured cadence until `stop` is raised.
    ///
    /// Capture failures are tolerated up to the configured consecutive
    /// budget; transmit failures only cost the affected tick. Anything
    /// else ends the run immediately.
    #[instrument(skip_all)]
    pub fn run(&mut self, stop: &StopHandle) -> Result<()> {
        info!(
            "Pipeline running, one tick every {}ms",
            self.config.tick_interval.as_millis()
        );

        let mut consecutive_capture_failures = 0u32;
        while !stop.load(Ordering::Relaxed) {
            let tick_started = Instant::now();

            match self.tick() {
                Ok(report) => {
                    consecutive_capture_failures = 0;
                    debug!(
                        capture_us = report.timings.capture.as_micros() as u64,
                        reduce_us = report.timings.reduce.as_micros() as u64,
                        send_us = report.timings.send.as_micros() as u64,
                        "Tick complete"
                    );
                    for observer in &mut self.observers {
                        observer.on_tick(&report);
                    }
                }
                Err(e @ (PipelineError::CaptureUnavailable(_)
                | PipelineError::RegionOutOfBounds(..))) => {
                    consecutive_capture_failures += 1;
                    warn!(
                        "Capture failed ({consecutive_capture_failures} consecutive): {e}"
                    );
                    let budget = self.config.max_consecutive_capture_failures;
                    if budget > 0 && consecutive_capture_failures >= budget {
                        return Err(e);
                    }
                }
                Err(PipelineError::TransmitFailure(e)) => {
                    consecutive_capture_failures = 0;
                    warn!("Dropped ArtDmx datagram: {e}");
                }
                Err(e) => return Err(e),
            }

            if let Some(remaining) = self.config.tick_interval.checked_sub(tick_started.elapsed())
            {
                thread::sleep(remaining);
            }
        }

        info!("Stop requested, pipeline halted");
        Ok(())
    }
}
