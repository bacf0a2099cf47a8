//! Error types for the assistant.

use thiserror::Error;

/// Result type for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Shown when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "Error: Gemini API key is not configured. Please set the API_KEY environment variable.";

/// Reasons a position could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The user refused access to the location.
    #[error("User denied Geolocation")]
    PermissionDenied,

    /// No position could be determined.
    #[error("Position unavailable: {0}")]
    Unavailable(String),

    /// The position did not arrive in time.
    #[error("Timeout expired")]
    Timeout,
}

/// Errors that can occur while talking to the generative text service.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No API key is configured.
    #[error("API key not configured")]
    MissingApiKey,

    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response carried no text.
    #[error("empty response")]
    EmptyResponse,

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Route planning needs at least one address.
    #[error("Please enter at least one address.")]
    NoAddresses,

    /// The current position could not be obtained.
    #[error("geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),
}

impl AssistantError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Converts the error into the text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::MissingApiKey => MISSING_KEY_MESSAGE.to_string(),
            AssistantError::NoAddresses => self.to_string(),
            AssistantError::Geolocation(e) => {
                format!("Geolocation error: {e}. Please enable location services.")
            }
            other => format!("An error occurred while contacting the AI assistant: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(AssistantError::MissingApiKey.user_message(), MISSING_KEY_MESSAGE);
        assert_eq!(
            AssistantError::NoAddresses.user_message(),
            "Please enter at least one address."
        );
        assert_eq!(
            AssistantError::from(GeolocationError::PermissionDenied).user_message(),
            "Geolocation error: User denied Geolocation. Please enable location services."
        );
        assert_eq!(
            AssistantError::Http {
                status: 429,
                body: "quota".into()
            }
            .user_message(),
            "An error occurred while contacting the AI assistant: HTTP 429: quota"
        );
    }
}
