//! Frame-to-color reduction.
//!
//! Collapses a captured frame into one RGB color in four steps: an optional
//! per-pixel HSV adjustment, optional pixelation, a per-channel mean, and the
//! configured reduction strategy. Channel math runs in floating point and is
//! truncated toward zero when it lands back in byte range, matching how the
//! rest of the pipeline treats channel values.

use image::{Rgb, RgbImage, imageops};

use crate::light_pipeline::capture::types::RawFrame;
use crate::light_pipeline::color::hsv;
use crate::light_pipeline::color::types::{Color, ReduceConfig, ReductionStrategy};

/// Reduces frames to single colors under a fixed configuration.
pub struct ColorReducer {
    config: ReduceConfig,
}

impl ColorReducer {
    pub fn new(config: ReduceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// Collapses one frame into the color that will drive the light.
    ///
    /// An empty frame reduces to black.
    pub fn reduce(&self, frame: &RawFrame) -> Color {
        if frame.pixel_count() == 0 {
            return Color::BLACK;
        }

        let adjusted;
        let mut image = &frame.image;
        if self.config.adjusts_hsv() {
            adjusted =
                adjust_hsv(image, self.config.brightness_gain, self.config.saturation_factor);
            image = &adjusted;
        }

        let pixelated;
        if let Some(size) = self.config.pixelation_size {
            pixelated = pixelate(image, size);
            image = &pixelated;
        }

        let means = channel_means(image);

        match self.config.strategy {
            ReductionStrategy::GainNormalize {
                gain_r,
                gain_g,
                gain_b,
                normalize,
            } => {
                let mut channels = [
                    (means[0] * gain_r as f64) as i64,
                    (means[1] * gain_g as f64) as i64,
                    (means[2] * gain_b as f64) as i64,
                ];
                if normalize {
                    let max = channels[0].max(channels[1]).max(channels[2]);
                    if max > 0 {
                        // Multiply before dividing so the peak channel lands
                        // exactly on 255 despite the truncation.
                        channels = channels.map(|c| (c as f64 * 255.0 / max as f64) as i64);
                    }
                }
                clamp_color(channels)
            }
            ReductionStrategy::DominantBoost {
                dominant_gain,
                base_gain,
            } => {
                let dominant = strictly_largest(&means);
                let gain_for = |channel: usize| -> f64 {
                    if dominant == Some(channel) {
                        dominant_gain as f64
                    } else {
                        base_gain as f64
                    }
                };
                clamp_color([
                    (means[0] * gain_for(0)) as i64,
                    (means[1] * gain_for(1)) as i64,
                    (means[2] * gain_for(2)) as i64,
                ])
            }
        }
    }
}

/// Re-expresses every pixel in HSV, shifts value, scales saturation, and
/// converts back. Both adjustments clamp to the valid channel range.
fn adjust_hsv(image: &RgbImage, brightness_gain: i32, saturation_factor: f32) -> RgbImage {
    let gain = brightness_gain as f32 / 255.0;
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let (h, s, v) = hsv::rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        let v = (v + gain).clamp(0.0, 1.0);
        let s = (s * saturation_factor).clamp(0.0, 1.0);
        let (r, g, b) = hsv::hsv_to_rgb(h, s, v);
        *pixel = Rgb([r, g, b]);
    }
    out
}

/// Downscales so the longer axis measures `size` pixels (linear filter),
/// then upscales back to the original dimensions with nearest-neighbor,
/// leaving a blocky frame whose mean weighs broad areas over fine detail.
fn pixelate(image: &RgbImage, size: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if size >= width.max(height) {
        return image.clone();
    }

    let (small_width, small_height) = if width >= height {
        (size, scaled_axis(height, size, width))
    } else {
        (scaled_axis(width, size, height), size)
    };

    let small = imageops::resize(image, small_width, small_height, imageops::FilterType::Triangle);
    imageops::resize(&small, width, height, imageops::FilterType::Nearest)
}

/// Scales `axis` by `size / longer`, truncating, with a one-pixel floor.
fn scaled_axis(axis: u32, size: u32, longer: u32) -> u32 {
    ((axis as u64 * size as u64 / longer as u64) as u32).max(1)
}

fn channel_means(image: &RgbImage) -> [f64; 3] {
    let mut sums = [0.0f64; 3];
    for pixel in image.pixels() {
        sums[0] += pixel[0] as f64;
        sums[1] += pixel[1] as f64;
        sums[2] += pixel[2] as f64;
    }
    let count = (image.width() as u64 * image.height() as u64) as f64;
    sums.map(|sum| sum / count)
}

/// Index of the strictly largest mean, or None on any tie for the maximum.
fn strictly_largest(means: &[f64; 3]) -> Option<usize> {
    let mut largest = 0;
    for channel in 1..3 {
        if means[channel] > means[largest] {
            largest = channel;
        }
    }
    for channel in 0..3 {
        if channel != largest && means[channel] == means[largest] {
            return None;
        }
    }
    Some(largest)
}

fn clamp_color(channels: [i64; 3]) -> Color {
    Color {
        r: channels[0].clamp(0, 255) as u8,
        g: channels[1].clamp(0, 255) as u8,
        b: channels[2].clamp(0, 255) as u8,
    }
}
