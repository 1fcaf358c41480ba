//! Shared constants for the latchkey access-control daemon.
//!
//! These values describe the credential-reader wire framing and the default
//! timing behavior of the actuation path. Timing defaults are starting
//! points only; the daemon exposes them as configuration.

// ============================================================================
// Credential stream framing
// ============================================================================

/// Start of text marker (STX).
///
/// The credential reader emits each token framed between STX and ETX
/// control characters:
///
/// ```text
/// <STX> A1B2C3D4 <ETX>
/// ```
pub const START_BYTE: u8 = 0x02; // STX

/// End of text marker (ETX).
///
/// Marks the end of one credential frame on the reader stream.
pub const END_BYTE: u8 = 0x03; // ETX

/// Maximum bytes the framer will accumulate without seeing an end marker.
///
/// A reader wedged mid-frame (or line noise with no ETX) must not grow the
/// frame buffer without bound. When this limit is exceeded the framer
/// discards the partial frame and resynchronizes on the next byte.
pub const MAX_FRAME_BUFFER: usize = 4 * 1024;

// ============================================================================
// Actuation timing defaults
// ============================================================================

/// Default actuator pulse dwell in milliseconds.
///
/// How long an actuator pin is held High per pulse before being returned
/// to Low. Whether 1000 ms matches a given actuator's pulse-width
/// requirement is deployment-specific, so the daemon treats this as a
/// configurable parameter rather than a fixed property of the arbiter.
pub const DEFAULT_DWELL_MS: u64 = 1000;

/// Default debounce window for reader-path unlocks in milliseconds.
///
/// Two authorized reads closer together than this window produce a single
/// physical pulse; a card held against the reader does not hammer the
/// actuator.
pub const DEFAULT_DEBOUNCE_MS: u64 = 5000;

// ============================================================================
// Daemon defaults
// ============================================================================

/// Default path of the authorized-token roster file.
pub const DEFAULT_ROSTER_PATH: &str = "list.txt";

/// Default credential reader serial device.
pub const DEFAULT_READER_DEVICE: &str = "/dev/ttyUSB0";

/// Default credential reader baud rate.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default listen address for the HTTP control surface.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8001";
