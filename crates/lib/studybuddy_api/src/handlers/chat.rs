//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::debug;

use crate::AppState;
use crate::models::{ChatReply, ChatRequest};

/// `POST /api/chat` — proxy a message to the completion API.
///
/// Always answers with a `reply` string. Only a missing or empty message is
/// reported as 400; every upstream problem becomes a 200 with fallback text.
/// A body that cannot be read as a chat request counts as a missing message.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatReply>) {
    let message = match &payload {
        Ok(Json(body)) => body.message.as_deref(),
        Err(rejection) => {
            debug!(%rejection, "unreadable chat request body");
            None
        }
    };

    match state.chat.handle(message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })),
        Err(failure) => {
            let status = if failure.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            debug!(%failure, status = status.as_u16(), "chat answered with fallback");
            (
                status,
                Json(ChatReply {
                    reply: failure.reply().to_string(),
                }),
            )
        }
    }
}
