//! Configuration error types for the Cianbox API SDK.
//!
//! Every newtype constructor and the configuration builder return
//! `Result<T, ConfigError>` so that invalid settings are rejected before a
//! client is ever built.
//!
//! # Example
//!
//! ```rust
//! use cianbox_api::{Account, ConfigError};
//!
//! let result = Account::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccount)));
//! ```

use thiserror::Error;

/// Errors that can occur while building SDK configuration or credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Account identifier cannot be empty.
    #[error("Account cannot be empty. Please provide your Cianbox account identifier.")]
    EmptyAccount,

    /// Account identifier contains characters that would alter the API URL.
    #[error("Invalid account '{account}'. Accounts may not contain whitespace or URL delimiters ('/', '?', '#', '@', ':', '%', '{{', '}}').")]
    InvalidAccount {
        /// The rejected account identifier.
        account: String,
    },

    /// API user cannot be empty.
    #[error("User cannot be empty. Please provide a valid Cianbox API user.")]
    EmptyUser,

    /// API password cannot be empty.
    #[error("Password cannot be empty. Please provide a valid Cianbox API password.")]
    EmptyPassword,

    /// Base URL template is invalid.
    #[error("Invalid base URL template '{url}'. Expected an http(s) URL containing the '{{account}}' placeholder.")]
    InvalidBaseUrl {
        /// The rejected template.
        url: String,
    },

    /// A CA certificate could not be parsed.
    #[error("Invalid CA certificate: {reason}")]
    InvalidCaCertificate {
        /// Parser message.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// Builder message.
        reason: String,
    },
}
