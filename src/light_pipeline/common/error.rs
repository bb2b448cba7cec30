use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to access display surface: {0}")]
    CaptureUnavailable(String),

    #[error("Capture region {0}x{1} does not fit surface {2}x{3}")]
    RegionOutOfBounds(u32, u32, u32, u32),

    #[error("Channel offset {0} leaves no room for an RGB triple in a 512-channel universe")]
    InvalidChannelOffset(u16),

    #[error("ArtDmx packet is {0} bytes, expected exactly {1}")]
    PacketInvariant(usize, usize),

    #[error("Failed to send ArtDmx datagram: {0}")]
    TransmitFailure(std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
