//! API server configuration.

use std::path::PathBuf;

use studybuddy_core::config::{ChatSettings, ClientConfig};
use tracing::info;

/// Configuration for the API server, resolved once at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// Directory holding the web client bundle; must contain `index.html`.
    pub static_dir: PathBuf,
    /// Chat proxy settings.
    pub chat: ChatSettings,
    /// Values exposed to the web client via `GET /api/config`.
    pub client: ClientConfig,
}

impl ApiConfig {
    /// Logs which settings are present, never their values.
    pub fn log_summary(&self) {
        info!(
            GOOGLE_CLIENT_ID = presence(self.client.google_client_id.as_deref()),
            GOOGLE_API_KEY = presence(self.client.google_api_key.as_deref()),
            MAPS_API_KEY = presence(self.client.maps_api_key.as_deref()),
            OPENAI_API_KEY = presence(self.chat.api_key.as_deref()),
            SHEETS_ID = presence(self.client.sheets_id.as_deref()),
            "environment variables loaded"
        );
        info!(
            endpoint = %self.chat.endpoint,
            model = %self.chat.model,
            static_dir = %self.static_dir.display(),
            "chat proxy configured"
        );
    }
}

/// An empty value reads as unset.
fn presence(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "Set",
        _ => "Not set",
    }
}
