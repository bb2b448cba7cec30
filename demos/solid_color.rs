//! Sends a fixed color to an Art-Net receiver, bypassing capture entirely.
//!
//! Useful for checking the receiver patch and channel offset:
//!
//! ```text
//! cargo run --example solid_color -- 255 0 64
//! ```

use std::thread;
use std::time::Duration;

use lumacast::light_pipeline::{
    Color, Destination, DmxUniverse, Transmitter, UdpTransmitter, artnet,
};

fn channel_arg(args: &mut std::env::Args, fallback: u8) -> anyhow::Result<u8> {
    match args.next() {
        Some(value) => Ok(value.parse()?),
        None => Ok(fallback),
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    args.next(); // program name

    let color = Color::new(
        channel_arg(&mut args, 255)?,
        channel_arg(&mut args, 0)?,
        channel_arg(&mut args, 0)?,
    );

    let destination = Destination::default();
    let transmitter = UdpTransmitter::new(&destination)?;
    let universe = DmxUniverse::with_rgb(1, color)?;
    let packet = artnet::encode(&universe);

    println!(
        "Sending RGB ({}, {}, {}) to {} on channels 1-3",
        color.r, color.g, color.b, destination
    );

    // Art-Net receivers generally expect a stream, not a single datagram.
    for _ in 0..20 {
        transmitter.send(&packet)?;
        thread::sleep(Duration::from_millis(100));
    }

    println!("Done");
    Ok(())
}
