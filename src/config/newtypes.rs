//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Cianbox account identifier.
///
/// The account selects the tenant and is substituted without escaping into
/// the API base URL, so characters that would change the URL structure are
/// rejected here.
///
/// # Example
///
/// ```rust
/// use cianbox_api::Account;
///
/// let account = Account::new("shop1").unwrap();
/// assert_eq!(account.as_ref(), "shop1");
/// assert!(Account::new("shop1/admin").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Account(String);

impl Account {
    const FORBIDDEN: [char; 8] = ['/', '?', '#', '@', ':', '%', '{', '}'];

    /// Creates a new validated account identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccount`] if the account is empty, or
    /// [`ConfigError::InvalidAccount`] if it contains whitespace or URL
    /// delimiters.
    pub fn new(account: impl Into<String>) -> Result<Self, ConfigError> {
        let account = account.into();
        if account.is_empty() {
            return Err(ConfigError::EmptyAccount);
        }

        if account
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || Self::FORBIDDEN.contains(&c))
        {
            return Err(ConfigError::InvalidAccount { account });
        }

        Ok(Self(account))
    }
}

impl AsRef<str> for Account {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Cianbox API user name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUser(String);

impl ApiUser {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUser`] if the user is empty.
    pub fn new(user: impl Into<String>) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.is_empty() {
            return Err(ConfigError::EmptyUser);
        }
        Ok(Self(user))
    }
}

impl AsRef<str> for ApiUser {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Cianbox API password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `ApiPassword(*****)`.
///
/// ```rust
/// use cianbox_api::ApiPassword;
///
/// let password = ApiPassword::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "ApiPassword(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiPassword(String);

impl ApiPassword {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for ApiPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiPassword(*****)")
    }
}

/// A validated API base URL template.
///
/// The template must use the `http` or `https` scheme and contain the
/// `{account}` placeholder, which is replaced by the account on every
/// request.
///
/// # Example
///
/// ```rust
/// use cianbox_api::BaseUrl;
///
/// let base = BaseUrl::new("https://cianbox.org/{account}/api/v2").unwrap();
/// assert_eq!(base.for_account("shop1"), "https://cianbox.org/shop1/api/v2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The placeholder substituted with the account identifier.
    pub const ACCOUNT_PLACEHOLDER: &'static str = "{account}";

    /// The production API base URL template.
    pub const DEFAULT: &'static str = "https://cianbox.org/{account}/api/v2";

    /// Creates a new validated base URL template.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is not http(s),
    /// the host is empty, or the placeholder is missing.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();

        let remainder = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));

        let valid = remainder.is_some_and(|rest| {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty()
        }) && url.contains(Self::ACCOUNT_PLACEHOLDER);

        if !valid {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url))
    }

    /// Substitutes `account` verbatim into the template.
    #[must_use]
    pub fn for_account(&self, account: &str) -> String {
        self.0.replace(Self::ACCOUNT_PLACEHOLDER, account)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
