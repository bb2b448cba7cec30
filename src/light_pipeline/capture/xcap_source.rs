//! Frame source implementation using the xcap library.
//!
//! This module grabs whole-surface screenshots through xcap and crops them to
//! the configured centered region. It works with whatever display server xcap
//! supports on the current platform (X11, Wayland, Windows, macOS).

use image::{DynamicImage, RgbaImage, imageops};
use tracing::debug;
use xcap::Monitor;

use crate::light_pipeline::capture::source::FrameSource;
use crate::light_pipeline::capture::types::{CaptureRegion, RawFrame, SurfaceInfo};
use crate::light_pipeline::common::error::{PipelineError, Result};

/// Frame source that uses the xcap library for screen capture.
pub struct XcapFrameSource;

impl XcapFrameSource {
    /// Enumerates the attached display surfaces in index order.
    pub fn surfaces() -> Result<Vec<SurfaceInfo>> {
        let monitors =
            Monitor::all().map_err(|e| PipelineError::CaptureUnavailable(e.to_string()))?;

        Ok(monitors
            .iter()
            .enumerate()
            .map(|(index, monitor)| SurfaceInfo {
                index,
                name: monitor.name().to_string(),
                width: monitor.width(),
                height: monitor.height(),
                is_primary: monitor.is_primary(),
            })
            .collect())
    }

    fn monitor_at(index: usize) -> Result<Monitor> {
        let mut monitors =
            Monitor::all().map_err(|e| PipelineError::CaptureUnavailable(e.to_string()))?;

        if index >= monitors.len() {
            return Err(PipelineError::CaptureUnavailable(format!(
                "no display surface at index {index} ({} attached)",
                monitors.len()
            )));
        }
        Ok(monitors.swap_remove(index))
    }
}

impl FrameSource for XcapFrameSource {
    /// Captures the centered region of the configured surface.
    ///
    /// The region is validated against the advertised surface bounds before
    /// any pixels are grabbed, so an oversized region never triggers a
    /// platform capture call.
    fn capture(&self, region: &CaptureRegion) -> Result<RawFrame> {
        let monitor = Self::monitor_at(region.surface_index)?;
        region.anchor_in(monitor.width(), monitor.height())?;

        let shot = monitor
            .capture_image()
            .map_err(|e| PipelineError::CaptureUnavailable(e.to_string()))?;

        // The platform may hand back a frame at a different scale than the
        // advertised bounds (HiDPI); anchor within what we actually got.
        let (shot_width, shot_height) = (shot.width(), shot.height());
        let (x, y) = region.anchor_in(shot_width, shot_height)?;

        debug!(
            "Captured {}x{} frame from surface {}, cropping {}x{} at ({}, {})",
            shot_width, shot_height, region.surface_index, region.width, region.height, x, y
        );

        let rgba = RgbaImage::from_raw(shot_width, shot_height, shot.into_raw()).ok_or_else(
            || PipelineError::CaptureUnavailable("capture returned a truncated pixel buffer".into()),
        )?;
        let cropped = imageops::crop_imm(&rgba, x, y, region.width, region.height).to_image();

        Ok(RawFrame::new(DynamicImage::ImageRgba8(cropped).to_rgb8()))
    }
}
