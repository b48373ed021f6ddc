//! WebSocket live inbox stream.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /ws — WebSocket upgrade.
///
/// The stream sends the caller's inbox snapshot as JSON text on connect and
/// again after every change to that inbox. Inbound text is ignored; the
/// stream is one-way.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    auth: AuthUser,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, auth, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, auth: AuthUser, socket: WebSocket) {
    let recipient = auth.user_id();

    let mut subscription = match state.projection.subscribe(recipient).await {
        Ok(subscription) => subscription,
        Err(err) => {
            warn!(user = %recipient, error = %err, "Inbox subscription failed");
            return;
        }
    };

    let (mut ws_tx, mut ws_rx) = socket.split();

    info!(user = %recipient, "Inbox stream connected");

    // Initial snapshot, then one message per change.
    let mut snapshot = Some(subscription.snapshot());
    loop {
        if let Some(snapshot) = snapshot.take() {
            let payload = match serde_json::to_string(&snapshot) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(user = %recipient, error = %err, "Snapshot serialization failed");
                    break;
                }
            };
            if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }

        tokio::select! {
            changed = subscription.changed() => match changed {
                Ok(next) => snapshot = Some(next),
                Err(_) => break,
            },
            inbound = ws_rx.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(user = %recipient, error = %err, "WebSocket error");
                    break;
                }
            },
        }
    }

    subscription.unsubscribe();
    info!(user = %recipient, "Inbox stream closed");
}
