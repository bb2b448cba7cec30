//! Art-Net transmitter over a plain UDP socket.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::debug;

use crate::light_pipeline::artnet::packet::PACKET_LEN;
use crate::light_pipeline::artnet::transmitter::Transmitter;
use crate::light_pipeline::artnet::types::Destination;
use crate::light_pipeline::common::error::{PipelineError, Result};

/// Fire-and-forget ArtDmx output.
///
/// The socket is bound once at startup, reused for every tick, and released
/// when the transmitter drops. Art-Net expects no replies, so nothing reads
/// from the socket.
pub struct UdpTransmitter {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpTransmitter {
    /// Binds an ephemeral local socket and resolves the destination.
    pub fn new(destination: &Destination) -> Result<Self> {
        let resolved = (destination.host.as_str(), destination.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                PipelineError::InvalidConfig(format!(
                    "destination {destination} does not resolve to an address"
                ))
            })?;
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;

        debug!("Art-Net transmitter ready, destination {}", resolved);
        Ok(Self {
            socket,
            destination: resolved,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }
}

impl Transmitter for UdpTransmitter {
    /// Sends one ArtDmx datagram. Anything other than a full-size packet
    /// is refused before it reaches the wire.
    fn send(&self, packet: &[u8]) -> Result<()> {
        if packet.len() != PACKET_LEN {
            return Err(PipelineError::PacketInvariant(packet.len(), PACKET_LEN));
        }
        self.socket
            .send_to(packet, self.destination)
            .map_err(PipelineError::TransmitFailure)?;
        Ok(())
    }
}
