//! Actuation arbiter: the single serialization point for lock pulses.
//!
//! # Architecture
//!
//! ```text
//! reader path ────┐
//!                 ├──► command queue (mpsc, unbounded) ──► executor task
//! control surface ┘                                        (owns both pins)
//! ```
//!
//! Any number of producers submit [`ActuationCommand`]s through a cloned
//! [`ArbiterHandle`]. One executor task owns the Open and Close pins
//! exclusively and is their only writer. It dequeues one command, drives
//! the pin High, holds it for the dwell, drives it Low, and only then
//! dequeues the next — which is the sole mechanism guaranteeing that
//! pulses never overlap and that at most one actuator pin is High at any
//! instant.
//!
//! Ordering is strict arrival order on the queue: no priority, no
//! coalescing, and no cancellation of a pulse already in progress.
//!
//! Submission is fire-and-forget: `submit()` returns once the command is
//! queued, not once it has been executed. Callers that are documented as
//! synchronous over the pulse (the control surface's unlock) use
//! `submit_and_wait()`, which resolves after the pin has been returned to
//! Low.
//!
//! There is no hardware feedback on actuation: success is assumed once
//! the pulse completes, and a mechanically stuck lock is only observable
//! through the door status monitor's `Failure` state, which the arbiter
//! deliberately does not consult.

use crate::error::{HardwareError, Result};
use crate::traits::OutputPin;
use latchkey_core::ActuationCommand;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// One queued actuation request.
struct Request {
    command: ActuationCommand,
    /// Present for acknowledged submissions; fired after the pulse.
    done: Option<oneshot::Sender<()>>,
}

/// The executor half of the arbiter.
///
/// Owns both actuator pins exclusively. Created together with its
/// [`ArbiterHandle`]; run it as a dedicated task:
///
/// ```
/// use latchkey_core::ActuationCommand;
/// use latchkey_hardware::ActuationArbiter;
/// use latchkey_hardware::mock::{MockOutputPin, PinRecorder};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> latchkey_hardware::Result<()> {
///     let recorder = PinRecorder::new();
///     let open = MockOutputPin::new("open", recorder.clone());
///     let close = MockOutputPin::new("close", recorder.clone());
///
///     let (arbiter, handle) =
///         ActuationArbiter::new(Box::new(open), Box::new(close), Duration::from_millis(10));
///     tokio::spawn(arbiter.run());
///
///     handle.submit_and_wait(ActuationCommand::Open).await?;
///     assert_eq!(recorder.len(), 2); // High then Low
///     Ok(())
/// }
/// ```
pub struct ActuationArbiter {
    open_pin: Box<dyn OutputPin>,
    close_pin: Box<dyn OutputPin>,
    dwell: Duration,
    rx: mpsc::UnboundedReceiver<Request>,
}

impl ActuationArbiter {
    /// Create an arbiter over the two actuator pins.
    ///
    /// `dwell` is how long a pin is held High per pulse. It is a
    /// parameter, not a constant: real actuator pulse-width requirements
    /// vary per installation.
    pub fn new(
        open_pin: Box<dyn OutputPin>,
        close_pin: Box<dyn OutputPin>,
        dwell: Duration,
    ) -> (Self, ArbiterHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                open_pin,
                close_pin,
                dwell,
                rx,
            },
            ArbiterHandle { tx },
        )
    }

    /// Run the executor until every handle has been dropped.
    ///
    /// State machine per command: Idle → Driving(pin) on dequeue → Idle
    /// after the dwell elapses and the pin is set Low. A dequeued command
    /// always runs its pulse to completion; there is no abort path.
    pub async fn run(mut self) {
        info!(dwell_ms = self.dwell.as_millis() as u64, "actuation executor started");
        while let Some(request) = self.rx.recv().await {
            self.execute(request).await;
        }
        debug!("all arbiter handles dropped, actuation executor stopping");
    }

    async fn execute(&mut self, request: Request) {
        let pin = match request.command {
            ActuationCommand::Open => &self.open_pin,
            ActuationCommand::Close => &self.close_pin,
        };

        debug!(command = %request.command, "pulse start");
        pin.set_high();
        tokio::time::sleep(self.dwell).await;
        pin.set_low();
        debug!(command = %request.command, "pulse complete");

        if let Some(done) = request.done {
            // Receiver may have given up waiting; the pulse still ran.
            let _ = done.send(());
        }
    }
}

/// Producer handle for submitting actuation commands.
///
/// Cheap to clone; every clone feeds the same queue, so ordering across
/// producers is queue arrival order.
#[derive(Debug, Clone)]
pub struct ArbiterHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl ArbiterHandle {
    /// Submit a command, fire-and-forget.
    ///
    /// Returns once the command is accepted into the queue. The pulse has
    /// not necessarily run — or even started — when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::Shutdown`] if the executor task is gone.
    pub fn submit(&self, command: ActuationCommand) -> Result<()> {
        self.tx
            .send(Request {
                command,
                done: None,
            })
            .map_err(|_| HardwareError::Shutdown)
    }

    /// Submit a command and wait for its pulse to complete.
    ///
    /// Goes through the same queue as [`submit`](Self::submit) — it does
    /// not bypass serialization — so the wait covers both the queue delay
    /// and the full dwell.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::Shutdown`] if the executor is gone at
    /// submission, or [`HardwareError::AckLost`] if it terminates before
    /// completing this pulse.
    pub async fn submit_and_wait(&self, command: ActuationCommand) -> Result<()> {
        let (done, ack) = oneshot::channel();
        self.tx
            .send(Request {
                command,
                done: Some(done),
            })
            .map_err(|_| HardwareError::Shutdown)?;
        ack.await.map_err(|_| HardwareError::AckLost)
    }
}
