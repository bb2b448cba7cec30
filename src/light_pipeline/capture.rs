//! Frame capture module
//!
//! This module provides display-server-agnostic frame capture capabilities.

mod source;
mod xcap_source;
pub mod types;


pub use source::FrameSource;
pub use types::{CaptureRegion, RawFrame, SurfaceInfo};
pub use xcap_source::XcapFrameSource;
