use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use lumacast::light_pipeline::{
    AmbientPipeline, CaptureRegion, Destination, PipelineConfig, ReduceConfig, ReductionStrategy,
    StatusLineObserver, StopHandle, XcapFrameSource,
};
use lumacast::logger;

/// Samples the center of a display, reduces it to one color, and streams
/// that color to an Art-Net receiver such as QLC+.
#[derive(Parser)]
#[command(name = "lumacast", version, about)]
struct Cli {
    /// Host running the Art-Net receiver
    #[arg(long, value_name = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// UDP port the receiver listens on
    #[arg(long, value_name = "PORT", default_value_t = 6454)]
    port: u16,

    /// Display to sample, by index (see --list-monitors)
    #[arg(long, value_name = "N", default_value_t = 0)]
    monitor: usize,

    /// Width of the centered capture region, in pixels
    #[arg(long, value_name = "PX", default_value_t = 800)]
    width: u32,

    /// Height of the centered capture region, in pixels
    #[arg(long, value_name = "PX", default_value_t = 800)]
    height: u32,

    /// Milliseconds between ticks
    #[arg(long, value_name = "MS", default_value_t = 100)]
    interval: u64,

    /// Smoothing factor in (0, 1]; smaller eases transitions more, 1.0 disables
    #[arg(long, value_name = "FACTOR", default_value_t = 0.1)]
    smoothing: f32,

    /// Added to the HSV value channel of every pixel before averaging
    #[arg(long, value_name = "GAIN", default_value_t = 0, allow_negative_numbers = true)]
    brightness: i32,

    /// Multiplier on the HSV saturation channel of every pixel
    #[arg(long, value_name = "FACTOR", default_value_t = 1.0)]
    saturation: f32,

    /// Pixelate the frame so its longer axis measures this many pixels
    #[arg(long, value_name = "PX")]
    pixelate: Option<u32>,

    /// Red channel gain applied to the averaged color
    #[arg(long, value_name = "GAIN", default_value_t = 1.0)]
    gain_r: f32,

    /// Green channel gain applied to the averaged color
    #[arg(long, value_name = "GAIN", default_value_t = 1.0)]
    gain_g: f32,

    /// Blue channel gain applied to the averaged color
    #[arg(long, value_name = "GAIN", default_value_t = 1.0)]
    gain_b: f32,

    /// Rescale the averaged color so its brightest channel hits 255
    #[arg(long)]
    normalize: bool,

    /// Boost the dominant channel instead of applying per-channel gains
    #[arg(long, conflicts_with_all = ["gain_r", "gain_g", "gain_b", "normalize"])]
    dominant_boost: bool,

    /// Gain for the strictly dominant channel (with --dominant-boost)
    #[arg(long, value_name = "GAIN", default_value_t = 1.2)]
    dominant_gain: f32,

    /// Gain for the non-dominant channels (with --dominant-boost)
    #[arg(long, value_name = "GAIN", default_value_t = 0.85)]
    base_gain: f32,

    /// First DMX channel of the RGB triple, 0-based
    #[arg(long, value_name = "CH", default_value_t = 1,
          value_parser = clap::value_parser!(u16).range(0..=509))]
    channel_offset: u16,

    /// Consecutive capture failures tolerated before giving up (0 = forever)
    #[arg(long, value_name = "N", default_value_t = 10)]
    max_capture_failures: u32,

    /// List attached displays and exit
    #[arg(long)]
    list_monitors: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    if cli.list_monitors {
        return list_monitors();
    }

    let strategy = if cli.dominant_boost {
        ReductionStrategy::DominantBoost {
            dominant_gain: cli.dominant_gain,
            base_gain: cli.base_gain,
        }
    } else {
        ReductionStrategy::GainNormalize {
            gain_r: cli.gain_r,
            gain_g: cli.gain_g,
            gain_b: cli.gain_b,
            normalize: cli.normalize,
        }
    };

    let reduce = ReduceConfig::builder()
        .brightness_gain(cli.brightness)
        .saturation_factor(cli.saturation)
        .pixelation_size(cli.pixelate)
        .strategy(strategy)
        .build()?;

    let config = PipelineConfig::builder()
        .region(CaptureRegion::new(cli.monitor, cli.width, cli.height)?)
        .reduce(reduce)
        .smoothing_factor(cli.smoothing)
        .channel_offset(cli.channel_offset)
        .tick_interval(Duration::from_millis(cli.interval))
        .max_consecutive_capture_failures(cli.max_capture_failures)
        .build()?;

    let destination = Destination::new(cli.host, cli.port);

    info!("Starting lumacast...");
    info!(
        "Capture: monitor {}, {}x{} centered region, every {}ms",
        cli.monitor, cli.width, cli.height, cli.interval
    );
    info!(
        "Output: {} universe 0, channels {}-{}",
        destination,
        cli.channel_offset,
        cli.channel_offset + 2
    );

    let mut pipeline = AmbientPipeline::new(config, &destination)
        .with_context(|| format!("starting pipeline toward {destination}"))?;
    pipeline.add_observer(Box::new(StatusLineObserver));

    let stop: StopHandle = Arc::new(AtomicBool::new(false));
    spawn_stop_listener(stop.clone());
    info!("Press 'q' then Enter to stop");

    match pipeline.run(&stop) {
        Ok(()) => {
            info!("Pipeline stopped cleanly");
            Ok(())
        }
        Err(e) => {
            error!("Pipeline aborted: {e}");
            Err(e.into())
        }
    }
}

/// Raises `stop` when a lone `q` arrives on stdin.
fn spawn_stop_listener(stop: StopHandle) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) if line.trim().eq_ignore_ascii_case("q") => {
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

fn list_monitors() -> anyhow::Result<()> {
    let surfaces = XcapFrameSource::surfaces().context("enumerating displays")?;
    if surfaces.is_empty() {
        println!("No displays attached");
        return Ok(());
    }
    for surface in surfaces {
        println!(
            "{:>2}: {} ({}x{}){}",
            surface.index,
            surface.name,
            surface.width,
            surface.height,
            if surface.is_primary { " [primary]" } else { "" }
        );
    }
    Ok(())
}
