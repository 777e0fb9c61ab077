//! # studybuddy_api
//!
//! HTTP API library for StudyBuddy: chat proxy, client config and the
//! single-page web client.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get, post};
use studybuddy_core::chat::ChatProxy;
use studybuddy_core::completion::CompletionClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, client_config, fallback};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Chat proxy built from `config.chat`.
    pub chat: Arc<ChatProxy>,
}

impl AppState {
    /// State whose chat proxy talks to the configured OpenAI endpoint.
    pub fn new(config: ApiConfig) -> Self {
        let chat = ChatProxy::openai(config.chat.clone());
        Self {
            config,
            chat: Arc::new(chat),
        }
    }

    /// State with a caller-supplied completion client.
    pub fn with_completion_client(config: ApiConfig, client: Arc<dyn CompletionClient>) -> Self {
        let chat = ChatProxy::new(config.chat.clone(), client);
        Self {
            config,
            chat: Arc::new(chat),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Paths outside `/api/` are served from the static directory; anything that
/// is not a file there gets `index.html` so client-side routing works.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .route(
            routes::GET_API_CONFIG,
            get(client_config::client_config_handler),
        )
        .route(routes::ANY_API_ROOT, any(fallback::api_not_found))
        .route(routes::ANY_API_UNMATCHED, any(fallback::api_not_found));

    let static_dir = &state.config.static_dir;
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(api)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        .fallback_service(spa)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
