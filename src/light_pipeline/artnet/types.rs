//! Art-Net output types

use std::fmt;

/// Where ArtDmx datagrams are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Hostname or IP address of the Art-Net receiver
    pub host: String,
    /// UDP port the receiver listens on (6454 is the Art-Net standard)
    pub port: u16,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for Destination {
    /// A receiver on this machine, on the standard Art-Net port.
    fn default() -> Self {
        Self::new("127.0.0.1", 6454)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
