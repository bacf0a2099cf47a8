//! Configuration for the assistant.

use crate::prompts::KNOWLEDGE_BASE;
use std::time::Duration;

/// Default generative model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the generative text client.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// API key. Calls fail fast without one.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API base URL.
    pub endpoint: String,
    /// Upper bound on a single generation call.
    pub request_timeout: Duration,
    /// Upper bound on obtaining the current position.
    pub geolocation_timeout: Duration,
    /// System instruction sent with every call.
    pub system_instruction: String,
}

impl AssistantConfig {
    /// Creates a configuration without an API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(60),
            geolocation_timeout: Duration::from_secs(10),
            system_instruction: KNOWLEDGE_BASE.to_string(),
        }
    }

    /// Reads the API key from `API_KEY`, falling back to `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the API key through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = ["API_KEY", "GEMINI_API_KEY"]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());
        Self {
            api_key,
            ..Self::new()
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the geolocation timeout.
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// URL of the content generation method for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self::new()
    }
}
