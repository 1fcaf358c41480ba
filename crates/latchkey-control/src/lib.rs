//! Remote control surface for the latchkey daemon.
//!
//! A single HTTP endpoint, `GET /latch?action=...`, exposes three
//! operations:
//!
//! - `state` — sample the door status monitor and report its state name.
//! - `unlock` — pulse the Open pin through the actuation arbiter and
//!   respond once the pulse has completed.
//! - `lock` — respond with a fixed acknowledgment. This action performs
//!   no pin manipulation at all; remote locking is not wired to the
//!   Close output, and callers must not assume otherwise.
//!
//! Anything else is rejected with a usage message before it can reach
//! hardware. The surface shares the arbiter queue with the reader path,
//! so a remote unlock and a badge-triggered unlock can never overlap.

pub mod action;
pub mod server;

pub use action::Action;
pub use server::{ControlState, router, serve};
