//! Configuration types for the Cianbox API SDK.
//!
//! # Overview
//!
//! - [`CianboxConfig`]: Transport and identity settings shared by every request
//! - [`CianboxConfigBuilder`]: A builder for constructing [`CianboxConfig`] instances
//! - [`Account`], [`ApiUser`], [`ApiPassword`]: Validated credential newtypes
//! - [`BaseUrl`]: The validated API base URL template
//!
//! # Example
//!
//! ```rust
//! use cianbox_api::{BaseUrl, CianboxConfig};
//! use std::time::Duration;
//!
//! let config = CianboxConfig::builder()
//!     .base_url(BaseUrl::new("https://cianbox.org/{account}/api/v2").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{Account, ApiPassword, ApiUser, BaseUrl};

use std::time::Duration;

use crate::clients::SDK_VERSION;
use crate::error::ConfigError;

/// Application name sent with the credential exchange.
pub const DEFAULT_APP_NAME: &str = concat!("Cianbox Rust SDK v", env!("CARGO_PKG_VERSION"));

/// Application code sent with the credential exchange.
pub const DEFAULT_APP_CODE: &str = concat!(
    "cianbox-rust-sdk-v",
    env!("CARGO_PKG_VERSION_MAJOR"),
    "-",
    env!("CARGO_PKG_VERSION_MINOR"),
    "-",
    env!("CARGO_PKG_VERSION_PATCH")
);

const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

/// Configuration for the Cianbox API SDK.
///
/// # Thread Safety
///
/// `CianboxConfig` is `Clone`, `Send`, and `Sync`.
///
/// # TLS
///
/// By default the transport verifies server certificates against the Mozilla
/// root bundle compiled into the library. Supplying
/// [`CianboxConfigBuilder::ca_certificate_pem`] replaces that bundle with the
/// given roots.
#[derive(Clone, Debug)]
pub struct CianboxConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    ca_certificates: Vec<Vec<u8>>,
    app_name: String,
    app_code: String,
}

impl CianboxConfig {
    /// Creates a new builder for constructing a `CianboxConfig`.
    #[must_use]
    pub fn builder() -> CianboxConfigBuilder {
        CianboxConfigBuilder::new()
    }

    /// Returns the base URL template.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the PEM-encoded CA roots replacing the built-in bundle.
    #[must_use]
    pub fn ca_certificates(&self) -> &[Vec<u8>] {
        &self.ca_certificates
    }

    /// Returns the application name sent during authentication.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the application code sent during authentication.
    #[must_use]
    pub fn app_code(&self) -> &str {
        &self.app_code
    }

    /// Returns the `User-Agent` header value for this configuration.
    #[must_use]
    pub fn user_agent(&self) -> String {
        let prefix = self
            .user_agent_prefix
            .as_deref()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        format!("{prefix}Cianbox API Library v{SDK_VERSION} | Rust {rust_version}")
    }
}

impl Default for CianboxConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            user_agent_prefix: None,
            timeout: None,
            ca_certificates: Vec::new(),
            app_name: DEFAULT_APP_NAME.to_string(),
            app_code: DEFAULT_APP_CODE.to_string(),
        }
    }
}

// Verify CianboxConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CianboxConfig>();
};

/// Builder for constructing [`CianboxConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://cianbox.org/{account}/api/v2`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (reqwest defaults)
/// - `ca_certificate_pem`: none, built-in roots are used
/// - `app_name` / `app_code`: derived from the crate version
#[derive(Debug, Default)]
pub struct CianboxConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    ca_certificates: Vec<Vec<u8>>,
    app_name: Option<String>,
    app_code: Option<String>,
}

impl CianboxConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL template.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a total timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a PEM-encoded root certificate.
    ///
    /// Once at least one root is added, the built-in bundle is no longer
    /// trusted and only the supplied roots verify the server.
    #[must_use]
    pub fn ca_certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_certificates.push(pem.into());
        self
    }

    /// Overrides the application name sent during authentication.
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Overrides the application code sent during authentication.
    #[must_use]
    pub fn app_code(mut self, code: impl Into<String>) -> Self {
        self.app_code = Some(code.into());
        self
    }

    /// Builds the [`CianboxConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCaCertificate`] if a supplied root
    /// certificate is not a PEM certificate block.
    pub fn build(self) -> Result<CianboxConfig, ConfigError> {
        for pem in &self.ca_certificates {
            let text = std::str::from_utf8(pem).map_err(|e| ConfigError::InvalidCaCertificate {
                reason: e.to_string(),
            })?;
            if !text.contains(PEM_CERTIFICATE_MARKER) {
                return Err(ConfigError::InvalidCaCertificate {
                    reason: format!("missing '{PEM_CERTIFICATE_MARKER}' block"),
                });
            }
        }

        Ok(CianboxConfig {
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            ca_certificates: self.ca_certificates,
            app_name: self
                .app_name
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_code: self
                .app_code
                .unwrap_or_else(|| DEFAULT_APP_CODE.to_string()),
        })
    }
}
