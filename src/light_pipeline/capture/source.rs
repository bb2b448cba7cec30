use crate::light_pipeline::capture::types::{CaptureRegion, RawFrame};
use crate::light_pipeline::common::error::Result;

pub trait FrameSource {
    fn capture(&self, region: &CaptureRegion) -> Result<RawFrame>;
}
