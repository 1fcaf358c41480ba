//! Credential reader stream handling for latchkey.
//!
//! This crate turns the raw byte stream coming from an RFID credential
//! reader into discrete [`Token`](latchkey_core::Token) values:
//!
//! - [`TokenFramer`] is the incremental parser that recognizes the
//!   STX/ETX framing and strips the delimiters.
//! - [`TokenStream`] drives a framer from an asynchronous byte source and
//!   yields a lazy, infinite, non-restartable sequence of tokens.
//! - [`serial`] bridges a physical serial device into a byte source.
//!
//! Any I/O fault on the underlying stream is fatal to the stream: the
//! framing state after a failed read is undefined, so the fault is
//! surfaced as [`Error::Stream`](latchkey_core::Error) and the process
//! supervisor is expected to restart the daemon.

#![allow(async_fn_in_trait)]

pub mod framer;
pub mod serial;
pub mod stream;

pub use framer::TokenFramer;
pub use serial::spawn_serial_source;
pub use stream::{ByteSource, ChannelByteSource, TokenStream};
