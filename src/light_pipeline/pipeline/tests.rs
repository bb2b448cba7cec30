#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::light_pipeline::artnet::Transmitter;
    use crate::light_pipeline::artnet::packet::{HEADER_LEN, PACKET_LEN};
    use crate::light_pipeline::capture::FrameSource;
    use crate::light_pipeline::capture::types::{CaptureRegion, RawFrame};
    use crate::light_pipeline::color::types::Color;
    use crate::light_pipeline::common::error::{PipelineError, Result};
    use crate::light_pipeline::pipeline::observer::TickObserver;
    use crate::light_pipeline::pipeline::runner::AmbientPipeline;
    use crate::light_pipeline::pipeline::types::{PipelineConfig, StopHandle, TickReport};

    enum SourceScript {
        Solid(Color),
        FailThenSolid { failures: u32, color: Color },
        AlwaysFail,
    }

    struct MockSource {
        surface_width: u32,
        surface_height: u32,
        script: SourceScript,
        calls: Arc<Mutex<u32>>,
        grabs: Arc<Mutex<u32>>,
    }

    impl MockSource {
        fn new(script: SourceScript) -> Self {
            Self {
                surface_width: 64,
                surface_height: 64,
                script,
                calls: Arc::new(Mutex::new(0)),
                grabs: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl FrameSource for MockSource {
        fn capture(&self, region: &CaptureRegion) -> Result<RawFrame> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };

            region.anchor_in(self.surface_width, self.surface_height)?;
            *self.grabs.lock().unwrap() += 1;

            match self.script {
                SourceScript::Solid(color) => Ok(solid_frame(color)),
                SourceScript::FailThenSolid { failures, color } => {
                    if call <= failures {
                        Err(PipelineError::CaptureUnavailable(
                            "mock grab failure".to_string(),
                        ))
                    } else {
                        Ok(solid_frame(color))
                    }
                }
                SourceScript::AlwaysFail => Err(PipelineError::CaptureUnavailable(
                    "mock grab failure".to_string(),
                )),
            }
        }
    }

    enum TransmitScript {
        Ok,
        FailFirst(u32),
        Invariant,
    }

    struct MockTransmitter {
        script: TransmitScript,
        attempts: Arc<Mutex<u32>>,
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl MockTransmitter {
        fn new(script: TransmitScript) -> Self {
            Self {
                script,
                attempts: Arc::new(Mutex::new(0)),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Transmitter for MockTransmitter {
        fn send(&self, packet: &[u8]) -> Result<()> {
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                *attempts += 1;
                *attempts
            };

            match self.script {
                TransmitScript::Ok => {}
                TransmitScript::FailFirst(failures) => {
                    if attempt <= failures {
                        return Err(PipelineError::TransmitFailure(std::io::Error::new(
                            std::io::ErrorKind::ConnectionRefused,
                            "mock send failure",
                        )));
                    }
                }
                TransmitScript::Invariant => {
                    return Err(PipelineError::PacketInvariant(packet.len(), PACKET_LEN));
                }
            }

            self.sent.lock().unwrap().push(packet.to_vec());
            Ok(())
        }
    }

    struct StoppingObserver {
        stop: StopHandle,
        remaining: u32,
        reports: Arc<Mutex<Vec<TickReport>>>,
    }

    impl TickObserver for StoppingObserver {
        fn on_tick(&mut self, report: &TickReport) {
            self.reports.lock().unwrap().push(report.clone());
            self.remaining -= 1;
            if self.remaining == 0 {
                self.stop.store(true, Ordering::Relaxed);
            }
        }
    }

    fn solid_frame(color: Color) -> RawFrame {
        RawFrame::new(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([color.r, color.g, color.b]),
        ))
    }

    fn test_config(smoothing_factor: f32) -> PipelineConfig {
        PipelineConfig::builder()
            .region(CaptureRegion::new(0, 4, 4).unwrap())
            .smoothing_factor(smoothing_factor)
            .tick_interval(Duration::from_millis(1))
            .build()
            .unwrap()
    }

    fn stop_handle() -> StopHandle {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::builder()
            .smoothing_factor(0.5)
            .channel_offset(7)
            .tick_interval(Duration::from_millis(50))
            .max_consecutive_capture_failures(3)
            .build()
            .unwrap();

        assert_eq!(config.smoothing_factor, 0.5);
        assert_eq!(config.channel_offset, 7);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.max_consecutive_capture_failures, 3);
        // Unset fields fall back to defaults
        assert_eq!(config.region.width, 800);
        assert_eq!(config.region.height, 800);
    }

    #[test]
    fn test_config_builder_rejects_bad_offset() {
        let err = PipelineConfig::builder().channel_offset(510).build().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidChannelOffset(510)));
    }

    #[test]
    fn test_config_builder_rejects_zero_interval() {
        let err = PipelineConfig::builder()
            .tick_interval(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_uniform_red_tick_sends_full_red() {
        let source = MockSource::new(SourceScript::Solid(Color::new(255, 0, 0)));
        let transmitter = MockTransmitter::new(TransmitScript::Ok);
        let sent = transmitter.sent.clone();

        let mut pipeline =
            AmbientPipeline::with_parts(source, transmitter, test_config(1.0)).unwrap();
        let report = pipeline.tick().unwrap();

        assert_eq!(report.raw, Color::new(255, 0, 0));
        assert_eq!(report.smoothed, Color::new(255, 0, 0));

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].len(), PACKET_LEN);
        // Default channel offset is 1
        assert_eq!(&sent[0][HEADER_LEN + 1..HEADER_LEN + 4], &[255, 0, 0]);
        assert_eq!(sent[0][HEADER_LEN], 0);
    }

    #[test]
    fn test_smoothing_advances_across_ticks() {
        let source = MockSource::new(SourceScript::Solid(Color::new(100, 100, 100)));
        let transmitter = MockTransmitter::new(TransmitScript::Ok);
        let sent = transmitter.sent.clone();

        let stop = stop_handle();
        let reports = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline =
            AmbientPipeline::with_parts(source, transmitter, test_config(0.1)).unwrap();
        pipeline.add_observer(Box::new(StoppingObserver {
            stop: stop.clone(),
            remaining: 2,
            reports: reports.clone(),
        }));

        pipeline.run(&stop).unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(&sent[0][HEADER_LEN + 1..HEADER_LEN + 4], &[10, 10, 10]);
        assert_eq!(&sent[1][HEADER_LEN + 1..HEADER_LEN + 4], &[19, 19, 19]);

        let reports = reports.lock().unwrap();
        assert_eq!(reports[0].raw, Color::new(100, 100, 100));
        assert_eq!(reports[0].smoothed, Color::new(10, 10, 10));
        assert_eq!(reports[1].smoothed, Color::new(19, 19, 19));
    }

    #[test]
    fn test_oversized_region_fails_before_grab() {
        let source = MockSource::new(SourceScript::Solid(Color::BLACK));
        let grabs = source.grabs.clone();
        let transmitter = MockTransmitter::new(TransmitScript::Ok);
        let sent = transmitter.sent.clone();

        let config = PipelineConfig {
            region: CaptureRegion::new(0, 100, 100).unwrap(),
            ..test_config(1.0)
        };
        let mut pipeline = AmbientPipeline::with_parts(source, transmitter, config).unwrap();

        let err = pipeline.tick().unwrap_err();
        assert!(matches!(err, PipelineError::RegionOutOfBounds(100, 100, 64, 64)));
        assert_eq!(*grabs.lock().unwrap(), 0);
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_run_exits_when_stop_raised_before_start() {
        let source = MockSource::new(SourceScript::Solid(Color::BLACK));
        let calls = source.calls.clone();
        let transmitter = MockTransmitter::new(TransmitScript::Ok);

        let stop = stop_handle();
        stop.store(true, Ordering::Relaxed);

        let mut pipeline =
            AmbientPipeline::with_parts(source, transmitter, test_config(1.0)).unwrap();
        pipeline.run(&stop).unwrap();

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_capture_failure_budget_ends_run() {
        let source = MockSource::new(SourceScript::AlwaysFail);
        let calls = source.calls.clone();
        let transmitter = MockTransmitter::new(TransmitScript::Ok);
        let sent = transmitter.sent.clone();

        let config = PipelineConfig {
            max_consecutive_capture_failures: 3,
            ..test_config(1.0)
        };
        let mut pipeline = AmbientPipeline::with_parts(source, transmitter, config).unwrap();

        let err = pipeline.run(&stop_handle()).unwrap_err();
        assert!(matches!(err, PipelineError::CaptureUnavailable(_)));
        assert_eq!(*calls.lock().unwrap(), 3);
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_capture_recovers_within_budget() {
        let source = MockSource::new(SourceScript::FailThenSolid {
            failures: 2,
            color: Color::new(50, 50, 50),
        });
        let calls = source.calls.clone();
        let transmitter = MockTransmitter::new(TransmitScript::Ok);
        let sent = transmitter.sent.clone();

        let stop = stop_handle();
        let config = PipelineConfig {
            max_consecutive_capture_failures: 3,
            ..test_config(1.0)
        };
        let mut pipeline = AmbientPipeline::with_parts(source, transmitter, config).unwrap();
        pipeline.add_observer(Box::new(StoppingObserver {
            stop: stop.clone(),
            remaining: 1,
            reports: Arc::new(Mutex::new(Vec::new())),
        }));

        pipeline.run(&stop).unwrap();

        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_transmit_failure_skips_tick_but_keeps_state() {
        let source = MockSource::new(SourceScript::Solid(Color::new(100, 100, 100)));
        let transmitter = MockTransmitter::new(TransmitScript::FailFirst(1));
        let attempts = transmitter.attempts.clone();
        let sent = transmitter.sent.clone();

        let stop = stop_handle();
        let reports = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline =
            AmbientPipeline::with_parts(source, transmitter, test_config(0.1)).unwrap();
        pipeline.add_observer(Box::new(StoppingObserver {
            stop: stop.clone(),
            remaining: 1,
            reports: reports.clone(),
        }));

        pipeline.run(&stop).unwrap();

        // First send was dropped, second delivered; smoothing still advanced
        // during the dropped tick, so the delivered packet carries step two.
        assert_eq!(*attempts.lock().unwrap(), 2);
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0][HEADER_LEN + 1..HEADER_LEN + 4], &[19, 19, 19]);
        assert_eq!(reports.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_packet_invariant_violation_is_fatal() {
        let source = MockSource::new(SourceScript::Solid(Color::new(1, 2, 3)));
        let transmitter = MockTransmitter::new(TransmitScript::Invariant);
        let attempts = transmitter.attempts.clone();

        let mut pipeline =
            AmbientPipeline::with_parts(source, transmitter, test_config(1.0)).unwrap();

        let err = pipeline.run(&stop_handle()).unwrap_err();
        assert!(matches!(err, PipelineError::PacketInvariant(..)));
        assert_eq!(*attempts.lock().unwrap(), 1);
    }

    #[test]
    fn test_pipeline_rejects_invalid_offset() {
        let source = MockSource::new(SourceScript::Solid(Color::BLACK));
        let transmitter = MockTransmitter::new(TransmitScript::Ok);

        let config = PipelineConfig {
            channel_offset: 600,
            ..test_config(1.0)
        };
        let err = AmbientPipeline::with_parts(source, transmitter, config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidChannelOffset(600)));
    }

    #[test]
    fn test_pipeline_rejects_invalid_smoothing_factor() {
        let source = MockSource::new(SourceScript::Solid(Color::BLACK));
        let transmitter = MockTransmitter::new(TransmitScript::Ok);

        let config = PipelineConfig {
            smoothing_factor: 0.0,
            ..test_config(1.0)
        };
        let err = AmbientPipeline::with_parts(source, transmitter, config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }
}
