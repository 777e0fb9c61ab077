//! Client configuration handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::ClientConfigResponse;

/// `GET /api/config` — values the web client needs at runtime.
///
/// Not authenticated: anything configured here is readable by any caller.
pub async fn client_config_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ClientConfigResponse>> {
    Ok(Json(ClientConfigResponse::from(&state.config.client)))
}
