//! Daemon configuration from environment variables.
//!
//! Every knob has a default matching a plain single-door installation, so
//! an empty environment produces a runnable configuration:
//!
//! | Variable               | Default        | Meaning                         |
//! |------------------------|----------------|---------------------------------|
//! | `LATCHKEY_ROSTER`      | `list.txt`     | authorized-token file           |
//! | `LATCHKEY_DEVICE`      | `/dev/ttyUSB0` | credential reader serial device |
//! | `LATCHKEY_BAUD`        | `9600`         | serial baud rate                |
//! | `LATCHKEY_LISTEN`      | `0.0.0.0:8001` | control surface bind address    |
//! | `LATCHKEY_DWELL_MS`    | `1000`         | actuator pulse hold time        |
//! | `LATCHKEY_DEBOUNCE_MS` | `5000`         | reader-path cool-down window    |

use latchkey_core::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_DEBOUNCE_MS, DEFAULT_DWELL_MS, DEFAULT_LISTEN_ADDR,
    DEFAULT_READER_DEVICE, DEFAULT_ROSTER_PATH,
};
use latchkey_core::{Error, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the authorized-token roster file.
    pub roster_path: String,

    /// Serial device of the credential reader.
    pub reader_device: String,

    /// Serial baud rate.
    pub baud_rate: u32,

    /// Bind address for the HTTP control surface.
    pub listen_addr: SocketAddr,

    /// How long an actuator pin is held High per pulse.
    pub dwell: Duration,

    /// Minimum time between two accepted reader-path unlocks.
    pub debounce_window: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a set variable fails to parse. Unset
    /// variables fall back to their defaults and never error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            roster_path: lookup("LATCHKEY_ROSTER").unwrap_or_else(|| DEFAULT_ROSTER_PATH.into()),
            reader_device: lookup("LATCHKEY_DEVICE")
                .unwrap_or_else(|| DEFAULT_READER_DEVICE.into()),
            baud_rate: parsed(&lookup, "LATCHKEY_BAUD", DEFAULT_BAUD_RATE)?,
            listen_addr: parse_value(
                "LATCHKEY_LISTEN",
                &lookup("LATCHKEY_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
            )?,
            dwell: Duration::from_millis(parsed(&lookup, "LATCHKEY_DWELL_MS", DEFAULT_DWELL_MS)?),
            debounce_window: Duration::from_millis(parsed(
                &lookup,
                "LATCHKEY_DEBOUNCE_MS",
                DEFAULT_DEBOUNCE_MS,
            )?),
        })
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| Error::config(format!("invalid {name} value {raw:?}: {e}")))
}

fn parsed<T>(lookup: impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}
