use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::info;

use super::error::ApiError;
use super::page::{render_notes_page, NOTES_SCRIPT};
use super::AppState;
use crate::entity::{NewNote, Note, NoteDone};
use crate::realtime::{ws::ws_handler, NoteEvent};

pub const FRONT_NOTES_PATH: &str = "/front/notes";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}/done", patch(toggle_done))
        .route(FRONT_NOTES_PATH, get(front_notes))
        .route("/static/script.js", get(script))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn root() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, FRONT_NOTES_PATH)]).into_response()
}

async fn create_note(State(state): State<AppState>, body: Bytes) -> Result<Json<Note>, ApiError> {
    let payload = NewNote::from_json(&body)?;
    let done = payload.done();

    let note = state
        .store
        .lock()
        .await
        .create(payload.title.as_deref(), payload.content.as_deref(), done)?;
    info!(id = note.id, "Created note");

    Ok(Json(note))
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.lock().await.list()?;
    Ok(Json(notes))
}

async fn toggle_done(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<NoteDone>, ApiError> {
    // Only plain digit runs are ids; signs and whitespace are not.
    let id: i64 = Some(raw_id.as_str())
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ApiError::not_found(format!("Note not found: {}", raw_id)))?;

    // The store lock is released before the event goes out.
    let note = state.store.lock().await.toggle_done(id)?;
    let update = NoteDone::from(&note);

    let delivered = state.broadcaster.publish(NoteEvent::NoteUpdated(update));
    info!(id, done = note.done, delivered, "Toggled note");

    Ok(Json(update))
}

async fn front_notes(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let notes = state.store.lock().await.list()?;
    Ok(Html(render_notes_page(&notes)))
}

async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        NOTES_SCRIPT,
    )
        .into_response()
}
