//! OpenAI chat completion client.
//!
//! Posts to the `/v1/chat/completions` endpoint with bearer auth. One attempt
//! per call, no timeout beyond the `reqwest` defaults.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{CompletionClient, CompletionError, CompletionRequest, CompletionResponse};

/// [`CompletionClient`] backed by an OpenAI-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: Url,
}

impl OpenAiClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Reuse an existing connection pool.
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        debug!(status = status.as_u16(), "completion endpoint responded");

        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // A body cut short is a failed call, not a malformed completion.
        let body = resp
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        serde_json::from_slice::<CompletionResponse>(&body)
            .map_err(|e| CompletionError::Decode(e.to_string()))
    }
}
