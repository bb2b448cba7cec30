//! ArtDmx packet assembly.
//!
//! One ArtDmx datagram is an 18-byte header followed by a full universe of
//! channel data:
//!
//! | offset | size | field            | encoding          |
//! |--------|------|------------------|-------------------|
//! | 0      | 8    | ID `"Art-Net\0"` | fixed bytes       |
//! | 8      | 2    | OpCode (OpDmx)   | little-endian     |
//! | 10     | 2    | protocol version | big-endian        |
//! | 12     | 1    | sequence         | 0 = disabled      |
//! | 13     | 1    | physical port    | 0                 |
//! | 14     | 2    | universe         | little-endian     |
//! | 16     | 2    | data length      | big-endian        |
//! | 18     | 512  | channel data     | one byte per chan |
//!
//! Receivers key on the ID and OpCode, so the header is assembled byte for
//! byte rather than through a serialization layer.

use crate::light_pipeline::color::Color;
use crate::light_pipeline::common::error::{PipelineError, Result};

/// Protocol identifier every Art-Net packet opens with, null terminator included.
pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

/// OpCode for a packet carrying one universe of DMX channel data.
pub const OP_DMX: u16 = 0x5000;

/// Protocol revision declared in the header.
pub const PROTOCOL_VERSION: u16 = 14;

/// The single output universe this tool addresses.
pub const UNIVERSE: u16 = 0;

/// Channels in one DMX universe.
pub const UNIVERSE_SIZE: usize = 512;

/// Header bytes ahead of the channel data.
pub const HEADER_LEN: usize = 18;

/// Total size of an ArtDmx datagram carrying a full universe.
pub const PACKET_LEN: usize = HEADER_LEN + UNIVERSE_SIZE;

/// Highest channel offset that still leaves room for an RGB triple.
pub const MAX_CHANNEL_OFFSET: u16 = (UNIVERSE_SIZE - 3) as u16;

/// One universe of channel values, rebuilt from scratch for every send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmxUniverse {
    channels: [u8; UNIVERSE_SIZE],
}

impl DmxUniverse {
    /// A universe that is dark except for `color` at `offset..offset + 3`.
    pub fn with_rgb(offset: u16, color: Color) -> Result<Self> {
        if offset > MAX_CHANNEL_OFFSET {
            return Err(PipelineError::InvalidChannelOffset(offset));
        }
        let mut channels = [0u8; UNIVERSE_SIZE];
        let start = offset as usize;
        channels[start] = color.r;
        channels[start + 1] = color.g;
        channels[start + 2] = color.b;
        Ok(Self { channels })
    }

    pub fn channels(&self) -> &[u8; UNIVERSE_SIZE] {
        &self.channels
    }
}

/// Serializes a universe into a complete ArtDmx datagram.
pub fn encode(universe: &DmxUniverse) -> Vec<u8> {
    let mut packet = Vec::with_capacity(PACKET_LEN);
    packet.extend_from_slice(ARTNET_ID);
    packet.extend_from_slice(&OP_DMX.to_le_bytes());
    packet.extend_from_slice(&PROTOCOL_VERSION.to_be_bytes());
    packet.push(0); // sequence disabled
    packet.push(0); // physical input port
    packet.extend_from_slice(&UNIVERSE.to_le_bytes());
    packet.extend_from_slice(&(UNIVERSE_SIZE as u16).to_be_bytes());
    packet.extend_from_slice(universe.channels());
    packet
}
