//! Color reduction configuration types

use crate::light_pipeline::common::error::{PipelineError, Result};

/// One RGB light color, a byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// How the averaged channel means become the output color
///
/// The two strategies are mutually exclusive; a config carries exactly one.
#[derive(Debug, Clone, Copy)]
pub enum ReductionStrategy {
    /// Per-channel gains, then an optional rescale so the brightest
    /// channel reaches 255 while the ratios between channels survive
    GainNormalize {
        gain_r: f32,
        gain_g: f32,
        gain_b: f32,
        normalize: bool,
    },
    /// Boost the strictly largest channel mean, damp the other two.
    /// On ties (including all-black frames) every channel gets `base_gain`
    DominantBoost { dominant_gain: f32, base_gain: f32 },
}

/// Configuration for frame-to-color reduction
#[derive(Debug, Clone)]
pub struct ReduceConfig {
    /// Added to the HSV value channel of every pixel; 0 disables the
    /// adjustment pass together with a saturation factor of 1.0
    pub brightness_gain: i32,
    /// Multiplier on the HSV saturation channel of every pixel
    pub saturation_factor: f32,
    /// Target size of the longer frame axis for pixelation; None disables
    pub pixelation_size: Option<u32>,
    /// Strategy applied to the averaged channel means
    pub strategy: ReductionStrategy,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            brightness_gain: 0,
            saturation_factor: 1.0,
            pixelation_size: None,
            strategy: ReductionStrategy::GainNormalize {
                gain_r: 1.0,
                gain_g: 1.0,
                gain_b: 1.0,
                normalize: false,
            },
        }
    }
}

impl ReduceConfig {
    pub fn builder() -> ReduceConfigBuilder {
        ReduceConfigBuilder::default()
    }

    /// Whether the per-pixel HSV pass does anything under this config.
    pub fn adjusts_hsv(&self) -> bool {
        self.brightness_gain != 0 || self.saturation_factor != 1.0
    }
}

/// Builder for ReduceConfig
#[derive(Default)]
pub struct ReduceConfigBuilder {
    brightness_gain: Option<i32>,
    saturation_factor: Option<f32>,
    pixelation_size: Option<Option<u32>>,
    strategy: Option<ReductionStrategy>,
}

impl ReduceConfigBuilder {
    pub fn brightness_gain(mut self, gain: i32) -> Self {
        self.brightness_gain = Some(gain);
        self
    }

    pub fn saturation_factor(mut self, factor: f32) -> Self {
        self.saturation_factor = Some(factor);
        self
    }

    pub fn pixelation_size(mut self, size: Option<u32>) -> Self {
        self.pixelation_size = Some(size);
        self
    }

    pub fn strategy(mut self, strategy: ReductionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(self) -> Result<ReduceConfig> {
        let default = ReduceConfig::default();
        let config = ReduceConfig {
            brightness_gain: self.brightness_gain.unwrap_or(default.brightness_gain),
            saturation_factor: self.saturation_factor.unwrap_or(default.saturation_factor),
            pixelation_size: self.pixelation_size.unwrap_or(default.pixelation_size),
            strategy: self.strategy.unwrap_or(default.strategy),
        };

        if config.saturation_factor.is_nan() || config.saturation_factor < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "saturation factor must be non-negative, got {}",
                config.saturation_factor
            )));
        }
        if config.pixelation_size == Some(0) {
            return Err(PipelineError::InvalidConfig(
                "pixelation size must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }
}
