use thiserror::Error;

use crate::record::ResourceId;

/// Failures reported by a [`crate::gateway::ResourceGateway`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Format(String),

    #[error("Resource #{id} not found")]
    NotFound { id: ResourceId },
}

impl GatewayError {
    /// Message suitable for a one-line toast or footer.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(msg) => format!("Cannot reach the server: {msg}"),
            Self::Api { status: 401 | 403, .. } => "Not authorized; check the API token".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Resource #{0} is not on the current page")]
    NotListed(ResourceId),

    #[error("Nothing is being edited")]
    NoEditSession,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{field} must be a whole number, got \"{value}\"")]
    InvalidNumber { field: String, value: String },
}

impl ControllerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Gateway(GatewayError::NotFound { .. }))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
