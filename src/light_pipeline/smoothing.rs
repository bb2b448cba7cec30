//! Temporal color smoothing.
//!
//! A single-pole low-pass filter over successive reduced colors: each tick
//! moves the output a fixed fraction of the way toward the current color.
//! The step never overshoots, so light transitions ease in rather than snap.

use crate::light_pipeline::color::Color;
use crate::light_pipeline::common::error::{PipelineError, Result};

/// The color carried between ticks; the only mutable pipeline state.
#[derive(Debug, Clone, Default)]
pub struct SmoothingState {
    last: Color,
}

impl SmoothingState {
    /// Fresh state, starting from black.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Color {
        self.last
    }
}

/// Exponential moving average over the reduced color stream.
#[derive(Debug, Clone, Copy)]
pub struct TemporalSmoother {
    factor: f32,
}

impl TemporalSmoother {
    /// Builds a smoother with the given factor in `(0, 1]`.
    ///
    /// Smaller factors follow the screen more lazily; 1.0 disables smoothing
    /// and passes reduced colors through unchanged.
    pub fn new(factor: f32) -> Result<Self> {
        if factor.is_nan() || factor <= 0.0 || factor > 1.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "smoothing factor must be in (0, 1], got {factor}"
            )));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Advances the state one tick toward `current` and returns the new color.
    pub fn smooth(&self, state: &mut SmoothingState, current: Color) -> Color {
        let next = Color {
            r: Self::step(state.last.r, current.r, self.factor),
            g: Self::step(state.last.g, current.g, self.factor),
            b: Self::step(state.last.b, current.b, self.factor),
        };
        state.last = next;
        next
    }

    // Fractional results truncate toward zero before the clamp.
    fn step(last: u8, current: u8, factor: f32) -> u8 {
        let next = last as f32 + (current as f32 - last as f32) * factor;
        (next as i32).clamp(0, 255) as u8
    }
}
