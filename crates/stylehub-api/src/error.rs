use thiserror::Error;

/// Shown when a failed request carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by the storefront API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the endpoint's schema.
    #[error("unparseable response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx status. `message` is the body's `message` field, if any.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// 2xx response whose envelope did not report success.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ApiError {
    /// Server-provided message when one was returned.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::UnexpectedStatus { message, .. } | ApiError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Text to show the customer: the server's message verbatim, else
    /// [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    }
}
