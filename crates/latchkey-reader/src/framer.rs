//! Incremental token framer for the credential reader stream.
//!
//! The reader emits one frame per presented credential, delimited by a
//! start byte (STX, `0x02`) and an end byte (ETX, `0x03`):
//!
//! ```text
//! <STX> A1B2C3D4 <ETX> <STX> 9F027A11 <ETX> ...
//! ```
//!
//! A serial connection has no message boundaries of its own: a single read
//! may contain a partial frame, one frame, or several. The framer
//! accumulates bytes until it sees an end marker, strips every start and
//! end marker from the accumulated buffer, and emits the remainder as one
//! token, in stream order.
//!
//! # Usage
//!
//! ```
//! use latchkey_reader::TokenFramer;
//!
//! let mut framer = TokenFramer::new();
//!
//! framer.feed(&[0x02, b'A', b'1']);
//! assert!(framer.next_token().is_none()); // frame not complete yet
//!
//! framer.feed(&[b'B', b'2', 0x03]);
//! let token = framer.next_token().unwrap();
//! assert_eq!(token.as_str(), "A1B2");
//! ```

use latchkey_core::Token;
use latchkey_core::constants::{END_BYTE, MAX_FRAME_BUFFER, START_BYTE};
use std::collections::VecDeque;
use tracing::warn;

/// Initial capacity for the frame accumulation buffer.
///
/// Real credential tokens are short (8-16 characters); 64 bytes avoids
/// reallocation for any legitimate frame.
const INITIAL_FRAME_CAPACITY: usize = 64;

/// Incremental parser turning reader bytes into [`Token`] values.
///
/// The framer is a pure accumulator: it never blocks and never touches
/// I/O, which keeps it independently testable. [`TokenStream`] pairs it
/// with an asynchronous byte source for the live reader path.
///
/// Tokens produced by the framer never contain the framing delimiters:
/// both markers are stripped wherever they occur in the accumulated
/// buffer, so a reader that omits the start marker (or stutters one
/// mid-frame) still yields a clean payload.
///
/// [`TokenStream`]: crate::stream::TokenStream
#[derive(Debug)]
pub struct TokenFramer {
    /// Bytes of the frame currently being accumulated.
    frame: Vec<u8>,

    /// Complete tokens ready for extraction, in stream order.
    tokens: VecDeque<Token>,
}

impl TokenFramer {
    /// Create a new framer.
    pub fn new() -> Self {
        Self {
            frame: Vec::with_capacity(INITIAL_FRAME_CAPACITY),
            tokens: VecDeque::new(),
        }
    }

    /// Feed bytes from the reader into the framer.
    ///
    /// Multiple tokens may become available from a single `feed()` call if
    /// the chunk contains multiple complete frames.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if byte == END_BYTE {
                self.finish_frame();
            } else {
                self.frame.push(byte);
                if self.frame.len() > MAX_FRAME_BUFFER {
                    // No end marker in sight: the device is wedged or
                    // babbling. Drop the partial frame and resynchronize.
                    warn!(
                        discarded = self.frame.len(),
                        "frame buffer limit exceeded, discarding partial frame"
                    );
                    self.frame.clear();
                }
            }
        }
    }

    /// Extract the next complete token, if any, in stream order.
    pub fn next_token(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Number of tokens ready for extraction.
    pub fn tokens_available(&self) -> usize {
        self.tokens.len()
    }

    /// Complete the current frame: strip delimiters, enqueue the token.
    fn finish_frame(&mut self) {
        self.frame.retain(|&b| b != START_BYTE);
        let payload = String::from_utf8_lossy(&self.frame).into_owned();
        self.tokens.push_back(Token::new(payload));
        self.frame.clear();
    }
}

impl Default for TokenFramer {
    fn default() -> Self {
        Self::new()
    }
}
