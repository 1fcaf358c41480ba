//! Pin capability traits.
//!
//! The core never addresses hardware directly; it sees pins only through
//! these two traits. Pin operations on memory-mapped GPIO complete in
//! nanoseconds and never block, so the traits are synchronous and
//! object-safe — the arbiter holds its output pins as `Box<dyn OutputPin>`
//! and pulse *timing* is handled with async sleeps around the calls, not
//! inside them.

use latchkey_core::Level;

/// A digital output line.
///
/// Actuator pins are normally Low and driven High only for the dwell of
/// one pulse. Exclusivity (at most one actuator pin High at any instant)
/// is enforced by the arbiter's serialization, never by the pin itself.
pub trait OutputPin: Send + Sync {
    /// Drive the line High.
    fn set_high(&self);

    /// Drive the line Low.
    fn set_low(&self);
}

/// A digital input line.
///
/// Reads are side-effect free and may be performed concurrently by any
/// number of callers.
pub trait InputPin: Send + Sync {
    /// Sample the current level of the line.
    fn read(&self) -> Level;
}
