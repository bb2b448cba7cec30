//! Frame capture data types

use image::RgbImage;

use crate::light_pipeline::common::error::{PipelineError, Result};

/// A fixed-size rectangle sampled from the center of one display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    /// Which attached display to sample, in platform enumeration order
    pub surface_index: usize,
    /// Width of the region in pixels
    pub width: u32,
    /// Height of the region in pixels
    pub height: u32,
}

impl CaptureRegion {
    /// Builds a region, rejecting empty dimensions.
    pub fn new(surface_index: usize, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "capture region must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            surface_index,
            width,
            height,
        })
    }

    /// Top-left corner of this region centered on a surface of the given size.
    ///
    /// Fails with [`PipelineError::RegionOutOfBounds`] when the region does
    /// not fit, so callers can bail out before grabbing any pixels.
    pub fn anchor_in(&self, surface_width: u32, surface_height: u32) -> Result<(u32, u32)> {
        if self.width > surface_width || self.height > surface_height {
            return Err(PipelineError::RegionOutOfBounds(
                self.width,
                self.height,
                surface_width,
                surface_height,
            ));
        }
        Ok(((surface_width - self.width) / 2, (surface_height - self.height) / 2))
    }
}

/// One captured frame, already normalized to canonical 8-bit RGB
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Pixel grid with any platform alpha channel dropped
    pub image: RgbImage,
}

impl RawFrame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }
}

/// Summary of one attached display surface
#[derive(Debug, Clone)]
pub struct SurfaceInfo {
    /// Index to pass as [`CaptureRegion::surface_index`]
    pub index: usize,
    /// Platform name of the display
    pub name: String,
    /// Advertised width in pixels
    pub width: u32,
    /// Advertised height in pixels
    pub height: u32,
    /// Whether the platform considers this the primary display
    pub is_primary: bool,
}
