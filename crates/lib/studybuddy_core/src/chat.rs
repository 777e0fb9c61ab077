//! Chat proxy — forwards a user message to the completion API and always
//! comes back with something the client can display.
//!
//! The flow is a fixed pipeline of stages, each returning a [`ChatFailure`]
//! on error:
//!
//! 1. [`validate_message`]: the message must be present and non-empty
//! 2. [`require_credential`]: an API key must be configured
//! 3. [`CompletionClient::complete`]: one upstream call, no retries
//! 4. [`extract_reply`]: first choice content, verbatim
//!
//! [`ChatFailure::reply`] is the only place failure kinds become user text.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::completion::openai::OpenAiClient;
use crate::completion::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse,
};
use crate::config::ChatSettings;

pub const REPLY_MISSING_MESSAGE: &str = "Message is required";
pub const REPLY_MISSING_CREDENTIAL: &str =
    "I'm currently unable to connect to my brain. Please check the server configuration.";
pub const REPLY_TRANSPORT: &str = "I had trouble processing your request. This might be due to network issues or an invalid API configuration.";
pub const REPLY_UPSTREAM_REJECTED: &str = "I encountered an issue connecting to my knowledge base. This might be due to an invalid API key or rate limiting.";
pub const REPLY_EMPTY_COMPLETION: &str = "No response from AI service";
pub const REPLY_UNEXPECTED: &str =
    "Sorry, I encountered an unexpected error. Please try again later.";

/// Ways a chat request can fail to produce a real completion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatFailure {
    #[error("message is missing or empty")]
    MissingMessage,

    #[error("no API key configured")]
    MissingCredential,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream rejected request with status {status}")]
    UpstreamRejected { status: u16 },

    #[error("upstream returned no usable content")]
    EmptyCompletion,

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ChatFailure {
    /// Fixed user-facing reply for this failure.
    pub fn reply(&self) -> &'static str {
        match self {
            ChatFailure::MissingMessage => REPLY_MISSING_MESSAGE,
            ChatFailure::MissingCredential => REPLY_MISSING_CREDENTIAL,
            ChatFailure::Transport(_) => REPLY_TRANSPORT,
            ChatFailure::UpstreamRejected { .. } => REPLY_UPSTREAM_REJECTED,
            ChatFailure::EmptyCompletion => REPLY_EMPTY_COMPLETION,
            ChatFailure::Unexpected(_) => REPLY_UNEXPECTED,
        }
    }

    /// Only bad input is reported to the caller as a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatFailure::MissingMessage)
    }
}

impl From<CompletionError> for ChatFailure {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Transport(msg) => ChatFailure::Transport(msg),
            CompletionError::Status { status, .. } => ChatFailure::UpstreamRejected { status },
            CompletionError::Decode(_) => ChatFailure::EmptyCompletion,
        }
    }
}

/// Stage 1: the message must be present and non-empty.
///
/// Whitespace-only messages are forwarded as-is.
pub fn validate_message(message: Option<&str>) -> Result<&str, ChatFailure> {
    match message {
        Some(m) if !m.is_empty() => Ok(m),
        _ => Err(ChatFailure::MissingMessage),
    }
}

/// Stage 2: an API key must be configured.
pub fn require_credential(settings: &ChatSettings) -> Result<&str, ChatFailure> {
    settings
        .api_key
        .as_deref()
        .ok_or(ChatFailure::MissingCredential)
}

/// Stage 4: the first choice's content, untouched.
pub fn extract_reply(response: CompletionResponse) -> Result<String, ChatFailure> {
    response
        .first_content()
        .map(str::to_string)
        .ok_or(ChatFailure::EmptyCompletion)
}

/// Proxies chat messages to the completion API.
#[derive(Clone)]
pub struct ChatProxy {
    settings: ChatSettings,
    client: Arc<dyn CompletionClient>,
}

impl ChatProxy {
    pub fn new(settings: ChatSettings, client: Arc<dyn CompletionClient>) -> Self {
        Self { settings, client }
    }

    /// Proxy backed by [`OpenAiClient`] at the configured endpoint.
    pub fn openai(settings: ChatSettings) -> Self {
        let client = OpenAiClient::new(settings.endpoint.clone());
        Self::new(settings, Arc::new(client))
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Runs the pipeline, converting anything that escapes it (including a
    /// panic in the upstream client) into [`ChatFailure::Unexpected`].
    pub async fn handle(&self, message: Option<&str>) -> Result<String, ChatFailure> {
        match AssertUnwindSafe(self.run(message)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "panic".to_string());
                error!(%detail, "chat handler failed unexpectedly");
                Err(ChatFailure::Unexpected(detail))
            }
        }
    }

    /// The stage pipeline without the panic boundary.
    pub async fn run(&self, message: Option<&str>) -> Result<String, ChatFailure> {
        let message = validate_message(message)?;

        let api_key = require_credential(&self.settings).inspect_err(|_| {
            warn!("OpenAI API key is missing");
        })?;

        info!(model = %self.settings.model, "sending chat request to completion API");
        let request = CompletionRequest::single_turn(
            &self.settings.model,
            &self.settings.system_prompt,
            message,
        );

        let response = self
            .client
            .complete(api_key, &request)
            .await
            .map_err(|e| {
                match &e {
                    CompletionError::Status { status, body } => {
                        error!(status, %body, "completion API returned an error");
                    }
                    other => error!(error = %other, "completion API call failed"),
                }
                ChatFailure::from(e)
            })?;

        let reply = extract_reply(response).inspect_err(|_| {
            warn!("completion API returned no content");
        })?;
        debug!(chars = reply.len(), "completion received");
        Ok(reply)
    }
}
