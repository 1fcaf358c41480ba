//! Error types for hardware operations.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur on the actuation path.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The arbiter executor task is gone; no further commands can run.
    #[error("actuation executor shut down")]
    Shutdown,

    /// A submitted command was dropped before its pulse completed.
    ///
    /// Only possible for acknowledged submissions, and only if the
    /// executor terminates between dequeue and completion.
    #[error("actuation acknowledgment lost")]
    AckLost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            HardwareError::Shutdown.to_string(),
            "actuation executor shut down"
        );
        assert_eq!(
            HardwareError::AckLost.to_string(),
            "actuation acknowledgment lost"
        );
    }
}
