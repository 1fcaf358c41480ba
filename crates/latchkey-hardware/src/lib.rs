//! Hardware abstraction and actuation arbitration for latchkey.
//!
//! The physical interface is four digital lines: two actuator outputs
//! (Open, Close) and two status inputs (StatusA, StatusB). This crate
//! treats them purely as capability sets — [`OutputPin`] can be driven
//! High or Low, [`InputPin`] can be read — with no dependency on any
//! hardware addressing scheme.
//!
//! Two components sit on top of the pins:
//!
//! - [`DoorSensors`]: side-effect-free snapshot of the two status lines,
//!   mapped to a [`DoorState`](latchkey_core::DoorState).
//! - [`ActuationArbiter`]: the single serialization point for actuation.
//!   Any number of producers submit [`ActuationCommand`]s through an
//!   [`ArbiterHandle`]; one executor task owns both output pins and
//!   drives one pulse at a time, in strict arrival order.
//!
//! Mock pin implementations with controller handles live in [`mock`];
//! they are the default backend (this daemon, like its test rig, runs
//! without physical GPIO unless a `hardware-*` feature provides a real
//! driver).
//!
//! [`ActuationCommand`]: latchkey_core::ActuationCommand

pub mod arbiter;
pub mod error;
pub mod mock;
pub mod sensors;
pub mod traits;

pub use arbiter::{ActuationArbiter, ArbiterHandle};
pub use error::{HardwareError, Result};
pub use sensors::{DoorSensors, DoorStateSource};
pub use traits::{InputPin, OutputPin};
