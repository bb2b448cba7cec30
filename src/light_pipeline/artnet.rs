//! Art-Net output module
//!
//! This module provides ArtDmx packet assembly and UDP transmission toward
//! an Art-Net receiver such as a lighting console or QLC+.

pub mod packet;
mod transmitter;
mod types;
mod udp_transmitter;


pub use packet::{DmxUniverse, encode};
pub use transmitter::Transmitter;
pub use types::Destination;
pub use udp_transmitter::UdpTransmitter;
