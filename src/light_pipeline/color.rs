//! Color reduction module
//!
//! This module collapses a captured frame into the single RGB color that
//! drives the light, with optional HSV adjustment and pixelation ahead of
//! the averaging step.

mod hsv;
mod reducer;
pub mod types;


pub use reducer::ColorReducer;
pub use types::{Color, ReduceConfig, ReduceConfigBuilder, ReductionStrategy};
