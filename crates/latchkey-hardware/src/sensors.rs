//! Door status monitor.
//!
//! The lock reports its position on two digital lines. Their combination
//! maps to a [`DoorState`]; both lines High at once is mechanically
//! impossible for a healthy lock and is reported as `Failure`, the only
//! externally visible failure in the system.

use crate::traits::InputPin;
use latchkey_core::DoorState;

/// Anything that can report the current door state.
///
/// The monitor itself is generic over its pins; this object-safe seam is
/// what state consumers (the control surface) hold.
pub trait DoorStateSource: Send + Sync {
    /// Sample the sensors and return the current state.
    fn current_state(&self) -> DoorState;
}

/// Monitor over the two door status lines.
///
/// Every call re-samples hardware; there is no caching and no hidden
/// state. Both lines are sampled back to back before the mapping is
/// applied, so the result never represents a torn combination read across
/// an unbounded interval.
#[derive(Debug)]
pub struct DoorSensors<A, B> {
    status_a: A,
    status_b: B,
}

impl<A: InputPin, B: InputPin> DoorSensors<A, B> {
    /// Create a monitor over the two status lines.
    pub fn new(status_a: A, status_b: B) -> Self {
        Self { status_a, status_b }
    }

    /// Sample both lines and map the snapshot to a door state.
    pub fn current_state(&self) -> DoorState {
        // Snapshot both lines first, then map.
        let a = self.status_a.read();
        let b = self.status_b.read();
        DoorState::from_levels(a, b)
    }
}

impl<A: InputPin, B: InputPin> DoorStateSource for DoorSensors<A, B> {
    fn current_state(&self) -> DoorState {
        DoorSensors::current_state(self)
    }
}
