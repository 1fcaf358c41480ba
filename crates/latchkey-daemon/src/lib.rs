//! Daemon wiring for latchkey.
//!
//! [`config`] resolves the runtime configuration from the environment and
//! [`engine`] runs the reader-path decision pipeline. The binary in
//! `main.rs` assembles both with the hardware, reader, and control crates.

pub mod config;
pub mod engine;

pub use config::Config;
pub use engine::{AccessEngine, TokenOutcome};
