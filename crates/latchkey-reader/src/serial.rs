//! Serial transport bridge for the credential reader.
//!
//! `serialport` reads are blocking, so the device is serviced on a
//! dedicated OS thread that forwards chunks into a [`ChannelByteSource`]
//! for the async reader path. Read timeouts are a normal idle condition
//! and are swallowed; any other read error is forwarded once and ends the
//! stream.

use crate::stream::ChannelByteSource;
use bytes::Bytes;
use latchkey_core::{Error, Result};
use std::io::Read;
use std::time::Duration;
use tracing::{debug, error};

/// Chunk buffer size for serial reads.
///
/// Credential frames are tiny; 256 bytes comfortably covers a burst of
/// several frames per read.
const READ_CHUNK_SIZE: usize = 256;

/// Poll timeout for the blocking read loop.
///
/// Short enough that thread shutdown (channel closed) is noticed
/// promptly, long enough not to spin while the reader is idle.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Channel capacity between the read thread and the async consumer.
const CHANNEL_CAPACITY: usize = 32;

/// Open the reader device and spawn its blocking read thread.
///
/// Returns the byte source to hand to a
/// [`TokenStream`](crate::stream::TokenStream). Failing to open the device
/// is a startup configuration fault; faults after open surface through the
/// source as fatal stream errors.
pub fn spawn_serial_source(device: &str, baud_rate: u32) -> Result<ChannelByteSource> {
    let mut port = serialport::new(device, baud_rate)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(|e| Error::config(format!("cannot open reader device {device}: {e}")))?;

    debug!(device, baud_rate, "credential reader opened");

    let (source, tx) = ChannelByteSource::new(CHANNEL_CAPACITY);
    let device = device.to_string();

    std::thread::Builder::new()
        .name("latchkey-serial".into())
        .spawn(move || {
            let mut buf = [0u8; READ_CHUNK_SIZE];
            loop {
                match port.read(&mut buf) {
                    Ok(0) => continue,
                    Ok(n) => {
                        let chunk = Bytes::copy_from_slice(&buf[..n]);
                        if tx.blocking_send(Ok(chunk)).is_err() {
                            // Consumer gone, daemon is shutting down.
                            return;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                    Err(e) => {
                        error!(device, error = %e, "credential reader fault");
                        let _ = tx.blocking_send(Err(e));
                        return;
                    }
                }
            }
        })
        .map_err(|e| Error::config(format!("cannot spawn serial read thread: {e}")))?;

    Ok(source)
}
