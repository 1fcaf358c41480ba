//! Mock pin implementations for testing and hardware-less operation.
//!
//! Mock output pins share a [`PinRecorder`] that logs every drive
//! operation with a timestamp, which is how tests observe pulse ordering
//! and non-overlap. Mock input pins come with a [`SensorHandle`] that
//! flips the simulated line level, mirroring the controller-handle pattern
//! used for every mock device in this codebase.
//!
//! # Examples
//!
//! ```
//! use latchkey_core::Level;
//! use latchkey_hardware::mock::{MockInputPin, MockOutputPin, PinRecorder};
//! use latchkey_hardware::traits::{InputPin, OutputPin};
//!
//! let recorder = PinRecorder::new();
//! let pin = MockOutputPin::new("open", recorder.clone());
//!
//! pin.set_high();
//! pin.set_low();
//! assert_eq!(recorder.events().len(), 2);
//!
//! let (sensor, handle) = MockInputPin::new(Level::Low);
//! handle.set(Level::High);
//! assert_eq!(sensor.read(), Level::High);
//! ```

use crate::traits::{InputPin, OutputPin};
use latchkey_core::Level;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// One recorded drive operation on a mock output pin.
#[derive(Debug, Clone)]
pub struct PinEvent {
    /// Name of the pin that was driven.
    pub pin: String,

    /// Level the pin was driven to.
    pub level: Level,

    /// When the drive happened.
    pub at: Instant,
}

/// Shared log of drive operations across a set of mock output pins.
///
/// Cloning shares the underlying log, so one recorder can observe all
/// pins owned by an arbiter.
#[derive(Debug, Clone, Default)]
pub struct PinRecorder {
    events: Arc<Mutex<Vec<PinEvent>>>,
}

impl PinRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, pin: &str, level: Level) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(PinEvent {
                pin: pin.to_string(),
                level,
                at: Instant::now(),
            });
    }

    /// Snapshot of all recorded events, in drive order.
    pub fn events(&self) -> Vec<PinEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of recorded drive operations.
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns `true` if nothing has been driven.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Mock digital output pin.
///
/// Clones share level state and recorder, so a test can keep one clone as
/// a probe while handing another to the arbiter.
#[derive(Debug, Clone)]
pub struct MockOutputPin {
    name: String,
    level: Arc<Mutex<Level>>,
    recorder: PinRecorder,
}

impl MockOutputPin {
    /// Create a named pin, initially Low, logging into `recorder`.
    pub fn new(name: impl Into<String>, recorder: PinRecorder) -> Self {
        Self {
            name: name.into(),
            level: Arc::new(Mutex::new(Level::Low)),
            recorder,
        }
    }

    /// Current driven level.
    pub fn level(&self) -> Level {
        *self
            .level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The pin's name as it appears in recorded events.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn drive(&self, level: Level) {
        *self
            .level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
        self.recorder.record(&self.name, level);
    }
}

impl OutputPin for MockOutputPin {
    fn set_high(&self) {
        self.drive(Level::High);
    }

    fn set_low(&self) {
        self.drive(Level::Low);
    }
}

/// Mock digital input pin.
#[derive(Debug, Clone)]
pub struct MockInputPin {
    level: Arc<Mutex<Level>>,
}

impl MockInputPin {
    /// Create a pin at `initial` and the handle that controls it.
    pub fn new(initial: Level) -> (Self, SensorHandle) {
        let level = Arc::new(Mutex::new(initial));
        (
            Self {
                level: Arc::clone(&level),
            },
            SensorHandle { level },
        )
    }
}

impl InputPin for MockInputPin {
    fn read(&self) -> Level {
        *self
            .level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Controller handle for a [`MockInputPin`].
#[derive(Debug, Clone)]
pub struct SensorHandle {
    level: Arc<Mutex<Level>>,
}

impl SensorHandle {
    /// Set the simulated line level.
    pub fn set(&self, level: Level) {
        *self
            .level
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_pin_records_drives() {
        let recorder = PinRecorder::new();
        let pin = MockOutputPin::new("open", recorder.clone());

        assert_eq!(pin.level(), Level::Low);
        pin.set_high();
        assert_eq!(pin.level(), Level::High);
        pin.set_low();
        assert_eq!(pin.level(), Level::Low);

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].pin, "open");
        assert_eq!(events[0].level, Level::High);
        assert_eq!(events[1].level, Level::Low);
    }

    #[test]
    fn test_recorder_shared_across_pins() {
        let recorder = PinRecorder::new();
        let open = MockOutputPin::new("open", recorder.clone());
        let close = MockOutputPin::new("close", recorder.clone());

        open.set_high();
        close.set_high();

        let events = recorder.events();
        assert_eq!(events[0].pin, "open");
        assert_eq!(events[1].pin, "close");
    }

    #[test]
    fn test_input_pin_follows_handle() {
        let (pin, handle) = MockInputPin::new(Level::Low);
        assert_eq!(pin.read(), Level::Low);

        handle.set(Level::High);
        assert_eq!(pin.read(), Level::High);
    }
}
