//! Environment-derived settings.
//!
//! Settings are resolved once at startup and handed to the components that
//! need them; nothing in the request path reads the environment.

use std::env;

use thiserror::Error;
use url::Url;

/// Default chat completion endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Persona instruction sent as the system turn of every completion.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are StudyBuddy, a helpful study assistant.";

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the chat proxy.
#[derive(Clone, Debug)]
pub struct ChatSettings {
    /// Bearer credential for the upstream API. `None` disables upstream calls.
    pub api_key: Option<String>,
    /// Chat completion endpoint.
    pub endpoint: Url,
    /// Model identifier sent with every request.
    pub model: String,
    /// Fixed system instruction.
    pub system_prompt: String,
}

impl ChatSettings {
    /// Reads settings from environment variables.
    ///
    /// | Variable          | Default                                      |
    /// |-------------------|----------------------------------------------|
    /// | `OPENAI_API_KEY`  | unset (empty counts as unset)                |
    /// | `OPENAI_API_URL`  | `https://api.openai.com/v1/chat/completions` |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OPENAI_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string());
        let endpoint = Url::parse(&endpoint)
            .map_err(|source| ConfigError::InvalidUrl {
                var: "OPENAI_API_URL",
                source,
            })?;

        Ok(Self {
            api_key: lookup("OPENAI_API_KEY").filter(|v| !v.is_empty()),
            endpoint,
            model: lookup("OPENAI_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Settings pointing at `endpoint` with the default model and prompt.
    pub fn new(api_key: Option<String>, endpoint: Url) -> Self {
        Self {
            api_key,
            endpoint,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Values the web client needs at runtime (sign-in, maps, sheets).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub google_client_id: Option<String>,
    pub google_api_key: Option<String>,
    pub maps_api_key: Option<String>,
    pub sheets_id: Option<String>,
}

impl ClientConfig {
    /// Environment variables backing each field, in field order.
    pub const KEYS: [&'static str; 4] =
        ["GOOGLE_CLIENT_ID", "GOOGLE_API_KEY", "MAPS_API_KEY", "SHEETS_ID"];

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Values are taken verbatim; only an unset variable becomes `None`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let [client_id, api_key, maps_key, sheets_id] = Self::KEYS;
        Self {
            google_client_id: lookup(client_id),
            google_api_key: lookup(api_key),
            maps_api_key: lookup(maps_key),
            sheets_id: lookup(sheets_id),
        }
    }
}
