//! Asynchronous token stream over an arbitrary byte source.
//!
//! [`TokenStream`] pairs a [`TokenFramer`] with a [`ByteSource`] and yields
//! tokens as they complete. The sequence is lazy (bytes are only pulled
//! when a token is requested), infinite while the source lives, and
//! non-restartable: the first source fault ends the stream permanently.

use crate::framer::TokenFramer;
use bytes::Bytes;
use latchkey_core::{Error, Result, Token};
use tokio::sync::mpsc;

/// An asynchronous source of reader bytes.
///
/// The trait uses native `async fn` (Edition 2024 RPITIT), so it is meant
/// for generic use rather than trait objects. A source returns chunks of
/// whatever size the transport produced; chunk boundaries carry no
/// meaning, the framer handles reassembly.
///
/// # Errors
///
/// A source returns `Err` exactly once, for a fault that ends the stream;
/// it must not be polled again afterwards.
pub trait ByteSource {
    /// Wait for the next chunk of bytes from the reader.
    async fn recv(&mut self) -> Result<Bytes>;
}

/// Byte source fed through an mpsc channel.
///
/// This is how a blocking transport (the serial read thread) and tests
/// hand bytes to the async reader path. An `Err` item or a closed channel
/// terminates the stream with a fatal [`Error::Stream`].
#[derive(Debug)]
pub struct ChannelByteSource {
    rx: mpsc::Receiver<std::io::Result<Bytes>>,
}

impl ChannelByteSource {
    /// Create a source and the sender half used to feed it.
    ///
    /// The channel is bounded so a stalled consumer applies backpressure
    /// to the read thread instead of buffering without limit.
    pub fn new(capacity: usize) -> (Self, mpsc::Sender<std::io::Result<Bytes>>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { rx }, tx)
    }
}

impl ByteSource for ChannelByteSource {
    async fn recv(&mut self) -> Result<Bytes> {
        match self.rx.recv().await {
            Some(Ok(chunk)) => Ok(chunk),
            Some(Err(e)) => Err(Error::stream(e.to_string())),
            None => Err(Error::stream("reader byte channel closed")),
        }
    }
}

/// Lazy, infinite sequence of tokens from a credential reader.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use latchkey_reader::{ChannelByteSource, TokenStream};
///
/// #[tokio::main]
/// async fn main() -> latchkey_core::Result<()> {
///     let (source, tx) = ChannelByteSource::new(8);
///     let mut stream = TokenStream::new(source);
///
///     tx.send(Ok(Bytes::from_static(b"\x02A1B2\x03"))).await.unwrap();
///
///     let token = stream.next_token().await?;
///     assert_eq!(token.as_str(), "A1B2");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TokenStream<S> {
    source: S,
    framer: TokenFramer,
}

impl<S: ByteSource> TokenStream<S> {
    /// Create a token stream over a byte source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            framer: TokenFramer::new(),
        }
    }

    /// Wait for the next complete token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stream`] if the underlying source faults. The
    /// stream must not be used after an error: the framing state is
    /// undefined and restart is the supervisor's job.
    pub async fn next_token(&mut self) -> Result<Token> {
        loop {
            if let Some(token) = self.framer.next_token() {
                return Ok(token);
            }
            let chunk = self.source.recv().await?;
            self.framer.feed(&chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokens_across_chunk_boundaries() {
        let (source, tx) = ChannelByteSource::new(8);
        let mut stream = TokenStream::new(source);

        tokio::spawn(async move {
            tx.send(Ok(Bytes::from_static(b"\x02A1"))).await.unwrap();
            tx.send(Ok(Bytes::from_static(b"B2\x03\x029F"))).await.unwrap();
            tx.send(Ok(Bytes::from_static(b"02\x03"))).await.unwrap();
        });

        assert_eq!(stream.next_token().await.unwrap().as_str(), "A1B2");
        assert_eq!(stream.next_token().await.unwrap().as_str(), "9F02");
    }

    #[tokio::test]
    async fn test_source_fault_is_fatal_stream_error() {
        let (source, tx) = ChannelByteSource::new(8);
        let mut stream = TokenStream::new(source);

        tx.send(Err(std::io::Error::other("device unplugged")))
            .await
            .unwrap();

        let err = stream.next_token().await.unwrap_err();
        assert!(matches!(err, Error::Stream { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_closed_channel_is_fatal() {
        let (source, tx) = ChannelByteSource::new(8);
        let mut stream = TokenStream::new(source);
        drop(tx);

        let err = stream.next_token().await.unwrap_err();
        assert!(matches!(err, Error::Stream { .. }));
    }
}
