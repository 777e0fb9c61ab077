//! Request and response bodies.

use serde::{Deserialize, Serialize};
use studybuddy_core::config::ClientConfig;

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/chat` response body, for every outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// `GET /api/config` response body. Unset values are left out.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClientConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_id: Option<String>,
}

impl From<&ClientConfig> for ClientConfigResponse {
    fn from(c: &ClientConfig) -> Self {
        Self {
            google_client_id: c.google_client_id.clone(),
            google_api_key: c.google_api_key.clone(),
            maps_api_key: c.maps_api_key.clone(),
            sheets_id: c.sheets_id.clone(),
        }
    }
}

/// Error body for API routes outside the chat contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
