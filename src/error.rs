//! Error types for Harvest API operations.

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during Harvest API operations.
///
/// Variants fall into four groups: configuration problems detected before
/// any I/O, transport failures, non-success HTTP statuses, and response
/// bodies that do not match the expected shape.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Configuration is missing or incomplete.
    #[error("Harvest configuration required: {0}")]
    ConfigMissing(String),

    /// A placeholder in the URL template had no (or an empty) path parameter.
    #[error("missing path parameter '{name}' for template '{template}'")]
    MissingPathParameter { name: String, template: String },

    /// A path parameter value would change the shape of the URL.
    #[error("invalid value '{value}' for path parameter '{name}' in template '{template}'")]
    InvalidPathParameter {
        name: String,
        value: String,
        template: String,
    },

    /// The URL template could not be parsed.
    #[error("invalid URL template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The query parameter set could not be serialized.
    #[error("invalid query parameters: {0}")]
    InvalidQuery(String),

    /// A request header name or value is not valid HTTP.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The HTTP client could not be set up.
    #[error("failed to build HTTP client: {0}")]
    ClientSetup(#[source] BoxError),

    /// The expanded URL is not a valid absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server replied with a non-success status.
    #[error("Harvest API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The server replied successfully but the body did not parse.
    #[error("Failed to parse response: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The call was cancelled before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

impl HarvestError {
    /// Whether this error was raised locally, before any network activity.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing(_)
                | Self::MissingPathParameter { .. }
                | Self::InvalidPathParameter { .. }
                | Self::InvalidHeader { .. }
                | Self::ClientSetup(_)
                | Self::InvalidTemplate { .. }
                | Self::InvalidQuery(_)
                | Self::InvalidUrl(_)
                | Self::Serialization(_)
        )
    }

    /// Whether the server could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status code, for [`HarvestError::HttpStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HarvestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::ClientSetup(Box::new(err))
        } else {
            Self::Transport(Box::new(err))
        }
    }
}

/// Result type alias for Harvest operations.
pub type Result<T> = core::result::Result<T, HarvestError>;
