pub mod messages;
pub mod scheduled_messages;
pub mod sessions;

use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post};
use std::fmt::Display;
use tracing::debug;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/users", get(messages::list_users))
        .route("/messages/summarize", post(messages::summarize))
        .route("/messages/send/{id}", post(messages::send))
        .route("/messages/read/{id}", post(messages::mark_read))
        .route("/messages/{id}", get(messages::list_thread))
        .route("/scheduled-messages", get(scheduled_messages::list_pending))
        .route("/scheduled-messages/{id}", delete(scheduled_messages::cancel))
        .route(
            "/sessions",
            post(sessions::connect).delete(sessions::disconnect),
        )
        .route("/events", get(sessions::poll_events))
}

/// Turns an extractor rejection into a uniform decoding error.
pub(crate) fn decoded<T, R: Display>(extracted: Result<T, R>) -> ServiceResult<T> {
    extracted.map_err(|rejection| {
        debug!("Rejected request: {rejection}");
        AppError::DecodingRequestFailed
    })
}
