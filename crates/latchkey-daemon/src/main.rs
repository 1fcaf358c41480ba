//! latchkey - RFID door lock daemon.
//!
//! Reads credential frames from a serial RFID reader, validates them
//! against a flat-file roster, and pulses the door's Open line through a
//! single actuation queue. A small HTTP surface exposes remote state
//! queries and unlocking.
//!
//! The daemon exits on the first fatal fault (reader stream error, dead
//! actuation executor, control surface bind failure) and relies on its
//! supervisor for restarts.

use anyhow::Context;
use latchkey_access::{AccessRoster, DebounceGate, TokenValidator};
use latchkey_control::ControlState;
use latchkey_core::{DoorState, Level};
use latchkey_daemon::{AccessEngine, Config};
use latchkey_hardware::mock::{MockInputPin, MockOutputPin, PinRecorder};
use latchkey_hardware::{ActuationArbiter, DoorSensors, DoorStateSource};
use latchkey_reader::{TokenStream, spawn_serial_source};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("resolving configuration")?;
    info!(
        roster = %config.roster_path,
        device = %config.reader_device,
        listen = %config.listen_addr,
        "latchkey starting"
    );

    let roster = AccessRoster::load(&config.roster_path)
        .await
        .context("loading authorized-token roster")?;
    info!(entries = roster.len(), "roster loaded");

    // Pin bank. Mock pins are the default backend; a hardware-* feature on
    // latchkey-hardware supplies real GPIO drivers in its place.
    let recorder = PinRecorder::new();
    let open_pin = MockOutputPin::new("open", recorder.clone());
    let close_pin = MockOutputPin::new("close", recorder);
    let (status_a, _status_a_handle) = MockInputPin::new(Level::Low);
    let (status_b, _status_b_handle) = MockInputPin::new(Level::Low);

    let (arbiter, arbiter_handle) =
        ActuationArbiter::new(Box::new(open_pin), Box::new(close_pin), config.dwell);
    tokio::spawn(arbiter.run());

    let monitor: Arc<dyn DoorStateSource> = Arc::new(DoorSensors::new(status_a, status_b));
    if monitor.current_state() == DoorState::Failure {
        error!("door sensors report failure at startup");
    }

    let control = ControlState {
        arbiter: arbiter_handle.clone(),
        monitor,
    };
    // Losing the control surface is fatal: a daemon that cannot be remotely
    // queried or unlocked should be restarted, not limp on. The task's
    // result is collected below so the fault exits through main like every
    // other fatal error.
    let control_task = tokio::spawn(latchkey_control::serve(config.listen_addr, control));

    let source = spawn_serial_source(&config.reader_device, config.baud_rate)
        .context("opening credential reader")?;
    let mut tokens = TokenStream::new(source);

    let engine = AccessEngine::new(
        TokenValidator::new(roster),
        DebounceGate::new(config.debounce_window),
        arbiter_handle,
    );

    // Runs until the reader stream faults, the executor dies, or the
    // control surface goes down. Every branch is fatal and exits here.
    let fault = tokio::select! {
        outcome = engine.run(&mut tokens) => outcome,
        joined = control_task => match joined {
            Ok(Ok(())) => Err(anyhow::anyhow!("control surface stopped unexpectedly")),
            Ok(Err(e)) => Err(e).context("control surface failed"),
            Err(e) => Err(e).context("control surface task failed"),
        },
    };
    if let Err(err) = fault {
        error!(error = %err, "fatal fault, shutting down");
        return Err(err);
    }
    Ok(())
}
