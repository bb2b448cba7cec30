//! Screen-to-light pipeline module
//!
//! This module provides a structured approach to ambient display lighting,
//! with separate modules for frame capture, color reduction, temporal
//! smoothing, Art-Net output, and loop orchestration.

pub mod artnet;
pub mod capture;
pub mod color;
pub mod common;
pub mod pipeline;
pub mod smoothing;

pub use common::{
    PipelineError,
    Result,
};

pub use capture::{
    CaptureRegion,
    FrameSource,
    RawFrame,
    SurfaceInfo,
    XcapFrameSource,
};

pub use color::{
    Color,
    ColorReducer,
    ReduceConfig,
    ReduceConfigBuilder,
    ReductionStrategy,
};

pub use smoothing::{
    SmoothingState,
    TemporalSmoother,
};

pub use artnet::{
    Destination,
    DmxUniverse,
    Transmitter,
    UdpTransmitter,
};

pub use pipeline::{
    AmbientPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    StatusLineObserver,
    StopHandle,
    TickObserver,
    TickReport,
    TickTimings,
};
