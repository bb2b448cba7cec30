//! Mirrors a region of the screen onto DMX lighting over Art-Net.
//!
//! The library side of the crate; the `lumacast` binary wires these
//! pieces to the command line.

pub mod light_pipeline;
pub mod logger;
