//! Transport errors raised by the remote resource client.
//!
//! A [`TransportError`] keeps whatever the server sent back so the operation
//! wrappers can pull a human-readable message out of it. The extraction policy
//! lives in [`TransportError::user_message`] and has three outcomes:
//!
//! 1. the response body is JSON with a string `message` field → that string
//! 2. there was no response at all → [`NETWORK_ERROR_MESSAGE`]
//! 3. anything else → [`FALLBACK_ERROR_MESSAGE`]

use thiserror::Error;

/// Message used when the request never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error";

/// Message used when a failure response carries no usable `message` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived (connect, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    ///
    /// `body` is the parsed JSON body, or `None` if it was empty or not JSON.
    #[error("request failed with status code {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// A success response whose body did not match the expected envelope.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request URL could not be built from the configured base URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Returns the nested `message` field of the response body, if present.
    #[must_use]
    pub fn response_message(&self) -> Option<&str> {
        match self {
            Self::Status { body: Some(body), .. } => body.get("message")?.as_str(),
            _ => None,
        }
    }

    /// Reduces the error to the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Some(message) = self.response_message() {
            return message.to_string();
        }
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Status { .. } | Self::Decode(_) | Self::InvalidUrl(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
        }
    }
}
