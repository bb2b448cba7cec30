use crate::light_pipeline::common::error::Result;

pub trait Transmitter {
    fn send(&self, packet: &[u8]) -> Result<()>;
}
