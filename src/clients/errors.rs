//! Error types for Cianbox API calls.
//!
//! Every fallible operation of the SDK returns [`ApiError`]. Each variant
//! corresponds to one failure class and exposes a numeric code through
//! [`ApiError::code`].
//!
//! - [`ApiError::MissingField`]: a required request field was absent before any I/O
//! - [`ApiError::InvalidArgument`]: a filter or order argument had the wrong shape
//! - [`ApiError::InvalidPayload`]: a request or response body was not valid JSON
//! - [`ApiError::Transport`]: the HTTP call itself failed (network, TLS, timeout)
//! - [`ApiError::Authentication`]: the credential exchange was rejected
//! - [`ApiError::Application`]: the API answered with a `status: "error"` envelope
//! - [`ApiError::Config`]: the client could not be configured
//!
//! # Example
//!
//! ```rust,ignore
//! use cianbox_api::ApiError;
//!
//! match client.get("/productos/lista").await {
//!     Ok(result) => println!("{}: {}", result.status, result.body),
//!     Err(ApiError::Application { message }) => eprintln!("API rejected call: {message}"),
//!     Err(ApiError::Authentication { status }) => eprintln!("login failed ({status})"),
//!     Err(other) => eprintln!("request failed [{}]: {other}", other.code()),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// Unified error type for all Cianbox API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was not provided.
    #[error("No {field} specified")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
        /// Numeric code reported for this failure.
        code: u16,
    },

    /// A caller-supplied argument had the wrong shape.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// A JSON payload could not be parsed or encoded.
    #[error("JSON error [{reason}] - Data: {data}")]
    InvalidPayload {
        /// Parser or encoder message.
        reason: String,
        /// The offending data, unmodified.
        data: String,
    },

    /// The HTTP request could not be completed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The credential exchange returned a non-success status.
    #[error("Error obtaining the access token (HTTP {status})")]
    Authentication {
        /// HTTP status returned by the auth endpoint.
        status: u16,
    },

    /// The API returned an error envelope.
    #[error("{message}")]
    Application {
        /// Composite `status: message - code: description` text.
        message: String,
    },

    /// The client configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Creates a [`ApiError::MissingField`] for a request field.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field, code: 500 }
    }

    /// Returns the numeric code associated with this error.
    ///
    /// Application and argument errors report 400, authentication errors
    /// report the HTTP status of the credential exchange, and everything
    /// else reports 500 unless the variant carries its own code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::MissingField { code, .. } => *code,
            Self::InvalidArgument { .. } | Self::Application { .. } => 400,
            Self::Authentication { status } => *status,
            Self::InvalidPayload { .. } | Self::Transport(_) | Self::Config(_) => 500,
        }
    }
}
