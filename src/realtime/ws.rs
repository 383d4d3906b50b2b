use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use tracing::{debug, warn};

use super::Subscription;
use crate::server::AppState;

/// `GET /ws`: upgrade and stream `note_updated` events until the client leaves.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| {
        let subscription = state.broadcaster.register();
        forward_events(socket, subscription)
    })
}

async fn forward_events(mut socket: WebSocket, mut subscription: Subscription) {
    let client_id = subscription.id();
    debug!(client_id, "WebSocket connected");

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(client_id, "Failed to encode event: {}", e);
                        continue;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Clients never send anything meaningful.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    debug!(client_id, "WebSocket disconnected");
}
