//! Cool-down gate for reader-path unlocks.
//!
//! A card held against the reader, or a flickering read, produces a burst
//! of identical authorized tokens. The gate turns such a burst into one
//! physical pulse by suppressing any accepted unlock that follows another
//! within a fixed window.
//!
//! The gate protects only the reader path's automatic trigger; explicit
//! remote commands from the control surface are never throttled here.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Debounce gate over a single shared timestamp.
///
/// `admit()` is a single locked read-modify-write: two concurrent
/// authorizations can never both pass inside one window.
///
/// # Examples
///
/// ```
/// use latchkey_access::DebounceGate;
/// use std::time::Duration;
///
/// let gate = DebounceGate::new(Duration::from_secs(5));
/// assert!(gate.admit());
/// assert!(!gate.admit()); // second trigger inside the window
/// ```
#[derive(Debug)]
pub struct DebounceGate {
    window: Duration,
    last_accepted: Mutex<Option<Instant>>,
}

impl DebounceGate {
    /// Create a gate with the given cool-down window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: Mutex::new(None),
        }
    }

    /// Try to admit one unlock event.
    ///
    /// Returns `false` (event suppressed) if less than the window has
    /// elapsed since the last admitted event; otherwise records now and
    /// returns `true`. Call only after a successful authorization — a
    /// suppressed event still consumed nothing.
    pub fn admit(&self) -> bool {
        let now = Instant::now();
        let mut last = self
            .last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(previous) = *last
            && now.duration_since(previous) < self.window
        {
            // Callers own the logging; the gate only decides.
            return false;
        }
        *last = Some(now);
        true
    }

    /// The configured cool-down window.
    pub fn window(&self) -> Duration {
        self.window
    }
}
