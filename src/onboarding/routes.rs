//! REST + WebSocket endpoints for the onboarding wizard.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::controller::{WizardAction, WizardSnapshot};
use super::model::WizardOptions;
use super::sessions::WizardSessions;
use crate::error::Error;
use crate::server::error_response;

/// Frames sent from server to WebSocket clients.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage<'a> {
    /// Full wizard state, sent on connect and after every applied action.
    Snapshot { snapshot: &'a WizardSnapshot },
    /// An action from this client was rejected.
    Error { error: String },
}

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub sessions: Arc<WizardSessions>,
}

/// Build the onboarding REST and WebSocket routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/options", get(get_options))
        .route("/api/onboarding/sessions", post(mount_session))
        .route(
            "/api/onboarding/sessions/{id}",
            get(get_session).delete(unmount_session),
        )
        .route("/api/onboarding/sessions/{id}/actions", post(apply_action))
        .route("/ws/onboarding/{id}", get(ws_handler))
        .with_state(state)
}

fn parse_session_id(id: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Invalid session ID"})),
        )
            .into_response()
    })
}

// ── REST Endpoints ──────────────────────────────────────────────────────

/// GET /api/onboarding/options
async fn get_options() -> impl IntoResponse {
    Json(WizardOptions::catalog())
}

/// POST /api/onboarding/sessions
async fn mount_session(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let snapshot = state.sessions.mount().await;
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/onboarding/sessions/{id}
async fn get_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.sessions.snapshot(id).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(&Error::from(e)),
    }
}

/// DELETE /api/onboarding/sessions/{id}
async fn unmount_session(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.sessions.unmount(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&Error::from(e)),
    }
}

/// POST /api/onboarding/sessions/{id}/actions
async fn apply_action(
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
    Json(action): Json<WizardAction>,
) -> Response {
    let id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match state.sessions.apply(id, action).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            warn!(session_id = %id, error = %e, "Wizard action failed");
            error_response(&e)
        }
    }
}

// ── WebSocket ───────────────────────────────────────────────────────────

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<OnboardingRouteState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_session_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = state.sessions.snapshot(id).await {
        return error_response(&Error::from(e));
    }
    info!(session_id = %id, "Wizard WebSocket client connecting");
    ws.on_upgrade(move |socket| handle_socket(socket, state.sessions, id))
}

async fn handle_socket(mut socket: WebSocket, sessions: Arc<WizardSessions>, id: Uuid) {
    let (initial, mut rx) = match sessions.subscribe(id).await {
        Ok(sub) => sub,
        Err(e) => {
            warn!(session_id = %id, error = %e, "Session vanished before WS subscribe");
            return;
        }
    };

    if !send_json(&mut socket, &WsMessage::Snapshot { snapshot: &initial }).await {
        warn!(session_id = %id, "Failed to send initial snapshot, client disconnected");
        return;
    }

    loop {
        tokio::select! {
            // Forward state changes (from this or any other client) to the socket
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        if !send_json(&mut socket, &WsMessage::Snapshot { snapshot: &snapshot }).await {
                            debug!(session_id = %id, "Client disconnected during send");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!(session_id = %id, missed = n, "WS client lagged behind broadcast");
                        // Re-sync with the latest state
                        match sessions.snapshot(id).await {
                            Ok(snapshot) => {
                                if !send_json(&mut socket, &WsMessage::Snapshot { snapshot: &snapshot }).await {
                                    break;
                                }
                            }
                            Err(_) => break,
                        }
                    }
                    Err(RecvError::Closed) => {
                        debug!(session_id = %id, "Session closed");
                        break;
                    }
                }
            }

            // Actions from the client
            result = socket.recv() => {
                match result {
                    Some(Ok(Message::Text(text))) => {
                        if !handle_client_message(&mut socket, &sessions, id, &text).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!(session_id = %id, "Wizard WebSocket client disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!(session_id = %id, error = %e, "WebSocket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    info!(session_id = %id, "Wizard WebSocket connection closed");
}

/// Apply one client frame. Successful actions reach the client through the
/// broadcast; failures are answered directly. Returns false to close.
async fn handle_client_message(
    socket: &mut WebSocket,
    sessions: &WizardSessions,
    id: Uuid,
    text: &str,
) -> bool {
    let action = match serde_json::from_str::<WizardAction>(text) {
        Ok(action) => action,
        Err(e) => {
            debug!(session_id = %id, error = %e, text = text, "Unrecognized WS message from client");
            return send_json(
                socket,
                &WsMessage::Error {
                    error: format!("invalid action: {e}"),
                },
            )
            .await;
        }
    };

    match sessions.apply(id, action).await {
        Ok(_) => true,
        Err(Error::Session(_)) => false,
        Err(e) => {
            warn!(session_id = %id, error = %e, "Wizard action failed via WS");
            send_json(
                socket,
                &WsMessage::Error {
                    error: e.to_string(),
                },
            )
            .await
        }
    }
}

async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize WS payload");
            true
        }
    }
}
