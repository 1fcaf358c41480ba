//! Actuation serialization under concurrent producers.
//!
//! Many tasks submit through cloned handles; the recorder must show a
//! strict High/Low alternation (no overlapping pulses) and pulses in the
//! exact order commands were accepted into the queue.

use latchkey_core::{ActuationCommand, Level};
use latchkey_hardware::mock::{MockOutputPin, PinRecorder};
use latchkey_hardware::{ActuationArbiter, ArbiterHandle};
use std::time::Duration;

fn spawn_arbiter(dwell: Duration) -> (PinRecorder, ArbiterHandle) {
    let recorder = PinRecorder::new();
    let open = MockOutputPin::new("open", recorder.clone());
    let close = MockOutputPin::new("close", recorder.clone());
    let (arbiter, handle) = ActuationArbiter::new(Box::new(open), Box::new(close), dwell);
    tokio::spawn(arbiter.run());
    (recorder, handle)
}

#[tokio::test]
async fn test_pulses_never_overlap() {
    let (recorder, handle) = spawn_arbiter(Duration::from_millis(5));

    let mut waiters = Vec::new();
    for _ in 0..8 {
        let handle = handle.clone();
        waiters.push(tokio::spawn(async move {
            handle.submit_and_wait(ActuationCommand::Open).await
        }));
    }
    for waiter in waiters {
        waiter.await.unwrap().unwrap();
    }

    let events = recorder.events();
    assert_eq!(events.len(), 16);

    // Strict High/Low alternation means no pulse started before the
    // previous one released its pin.
    for (i, event) in events.iter().enumerate() {
        let expected = if i % 2 == 0 { Level::High } else { Level::Low };
        assert_eq!(event.level, expected, "event {i} out of sequence");
    }

    // Each Low must not precede its High.
    for pair in events.chunks(2) {
        assert!(pair[1].at >= pair[0].at);
    }
}

#[tokio::test]
async fn test_pulses_run_in_submission_order() {
    let (recorder, handle) = spawn_arbiter(Duration::from_millis(2));

    // Submit from one task so the queue order is known, interleaving the
    // two commands.
    let sequence = [
        ActuationCommand::Open,
        ActuationCommand::Close,
        ActuationCommand::Close,
        ActuationCommand::Open,
        ActuationCommand::Close,
    ];
    for command in sequence {
        handle.submit(command).unwrap();
    }
    // A final acknowledged submission flushes everything queued before it.
    handle.submit_and_wait(ActuationCommand::Open).await.unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 12);

    let pins: Vec<&str> = events
        .iter()
        .step_by(2)
        .map(|event| event.pin.as_str())
        .collect();
    assert_eq!(pins, ["open", "close", "close", "open", "close", "open"]);
}

#[tokio::test]
async fn test_each_pulse_holds_full_dwell() {
    let dwell = Duration::from_millis(20);
    let (recorder, handle) = spawn_arbiter(dwell);

    handle.submit(ActuationCommand::Open).unwrap();
    handle.submit_and_wait(ActuationCommand::Open).await.unwrap();

    let events = recorder.events();
    for pair in events.chunks(2) {
        let held = pair[1].at.duration_since(pair[0].at);
        assert!(held >= dwell, "pulse held only {held:?}");
    }
}
