//! HTTP server for the control surface.

use crate::action::Action;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use latchkey_core::ActuationCommand;
use latchkey_hardware::{ArbiterHandle, DoorStateSource};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

const USAGE: &str = "action parameter must be one of state, unlock or lock";

/// Fixed acknowledgment for the `lock` action.
///
/// Deliberately identical to what a real lock would report: remote lock
/// is acknowledged but not wired to the Close pin.
const LOCK_ACK: &str = "LOCKED";

/// Response for a completed remote unlock.
const UNLOCK_ACK: &str = "UNLOCKED";

/// Shared state behind the control handlers.
#[derive(Clone)]
pub struct ControlState {
    /// Producer handle into the actuation queue, shared with the reader
    /// path.
    pub arbiter: ArbiterHandle,

    /// Door status monitor.
    pub monitor: Arc<dyn DoorStateSource>,
}

#[derive(Debug, Deserialize)]
struct LatchQuery {
    action: Option<String>,
}

/// Build the control router.
pub fn router(state: ControlState) -> Router {
    Router::new()
        .route("/latch", get(handle_latch))
        .with_state(state)
}

/// Bind `addr` and serve the control surface until the process exits.
pub async fn serve(addr: SocketAddr, state: ControlState) -> latchkey_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "control surface listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn handle_latch(
    State(state): State<ControlState>,
    Query(query): Query<LatchQuery>,
) -> Response {
    let Some(raw) = query.action.as_deref() else {
        warn!("latch request without action parameter");
        return (StatusCode::BAD_REQUEST, USAGE).into_response();
    };

    let Some(action) = Action::parse(raw) else {
        warn!(action = raw, "unknown latch action rejected");
        return (StatusCode::BAD_REQUEST, USAGE).into_response();
    };

    match action {
        Action::State => {
            let door_state = state.monitor.current_state();
            info!(state = %door_state, "door state queried");
            (StatusCode::OK, door_state.to_string()).into_response()
        },
        Action::Unlock => match state.arbiter.submit_and_wait(ActuationCommand::Open).await {
            Ok(()) => {
                info!("remote unlock pulse completed");
                (StatusCode::OK, UNLOCK_ACK).into_response()
            },
            Err(e) => {
                error!(error = %e, "remote unlock failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "actuation unavailable").into_response()
            },
        },
        Action::Lock => {
            // Acknowledgment only: the Close pin is intentionally not
            // driven by remote lock.
            info!("remote lock acknowledged (no actuation)");
            (StatusCode::OK, LOCK_ACK).into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_core::DoorState;
    use latchkey_hardware::ActuationArbiter;
    use latchkey_hardware::mock::{MockOutputPin, PinRecorder};
    use std::time::Duration;

    struct FixedMonitor(DoorState);

    impl DoorStateSource for FixedMonitor {
        fn current_state(&self) -> DoorState {
            self.0
        }
    }

    fn rig(door_state: DoorState) -> (PinRecorder, ControlState) {
        let recorder = PinRecorder::new();
        let open = MockOutputPin::new("open", recorder.clone());
        let close = MockOutputPin::new("close", recorder.clone());
        let (arbiter, handle) =
            ActuationArbiter::new(Box::new(open), Box::new(close), Duration::from_millis(2));
        tokio::spawn(arbiter.run());
        (
            recorder,
            ControlState {
                arbiter: handle,
                monitor: Arc::new(FixedMonitor(door_state)),
            },
        )
    }

    async fn latch(state: ControlState, action: Option<&str>) -> (StatusCode, String) {
        let response = handle_latch(
            State(state),
            Query(LatchQuery {
                action: action.map(String::from),
            }),
        )
        .await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_state_reports_monitor() {
        let (recorder, state) = rig(DoorState::Locked);

        let (status, body) = latch(state, Some("state")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "LOCKED");
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn test_unlock_pulses_open_pin_before_responding() {
        let (recorder, state) = rig(DoorState::Unknown);

        let (status, body) = latch(state, Some("unlock")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "UNLOCKED");
        // Pulse already finished when the response was produced.
        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].pin, "open");
        assert_eq!(events[1].pin, "open");
    }

    #[tokio::test]
    async fn test_lock_acknowledges_without_actuation() {
        let (recorder, state) = rig(DoorState::Unknown);

        let (status, body) = latch(state, Some("lock")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "LOCKED");
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action_is_rejected_without_hardware_effect() {
        let (recorder, state) = rig(DoorState::Unknown);

        let (status, body) = latch(state, Some("open")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, USAGE);
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn test_missing_action_is_rejected() {
        let (recorder, state) = rig(DoorState::Unknown);

        let (status, body) = latch(state, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, USAGE);
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn test_serve_bind_failure_returns_error() {
        // Occupy a port, then ask serve() to bind it: the failure must
        // come back as an error value for the caller to act on.
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap();
        let (_recorder, state) = rig(DoorState::Unknown);

        assert!(serve(addr, state).await.is_err());
    }

    #[tokio::test]
    async fn test_unlock_after_executor_gone_is_server_error() {
        let recorder = PinRecorder::new();
        let open = MockOutputPin::new("open", recorder.clone());
        let close = MockOutputPin::new("close", recorder);
        let (arbiter, handle) =
            ActuationArbiter::new(Box::new(open), Box::new(close), Duration::from_millis(1));
        drop(arbiter);
        let state = ControlState {
            arbiter: handle,
            monitor: Arc::new(FixedMonitor(DoorState::Unknown)),
        };

        let (status, _) = latch(state, Some("unlock")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
