use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Fault on the credential reader stream.
    ///
    /// Unrecoverable locally: the framing state is undefined after a read
    /// error, so this is propagated to the process entry point and the
    /// supervisor restarts the daemon.
    #[error("credential stream fault: {message}")]
    Stream { message: String },

    /// Startup configuration problem (missing roster, bad parameter).
    #[error("configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a stream fault from any underlying cause.
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` for faults that must abort the process.
    ///
    /// Stream and configuration faults are fatal; everything else in the
    /// system is recovered locally and never reaches this type.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Stream { .. } | Error::Config(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
