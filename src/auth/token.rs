//! Access token state cached by a client.
//!
//! A [`TokenState`] starts empty, is filled by the first successful
//! credential exchange, and is partially overwritten by a refresh. The
//! library never clears it and never checks expiry before a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token fields returned by the credential and refresh endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// The access token.
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Token used to obtain a new access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The token fields a client holds between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenState {
    /// The current access token.
    pub access_token: Option<String>,
    /// Lifetime of the access token in seconds, as reported by the API.
    pub expires_in: Option<i64>,
    /// The refresh token from the last credential exchange.
    pub refresh_token: Option<String>,
    /// When the access token was obtained.
    pub obtained_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// Returns `true` once an access token is cached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Replaces all fields with a credential exchange response.
    pub fn apply_credentials(&mut self, response: AccessTokenResponse) {
        self.access_token = Some(response.access_token);
        self.expires_in = response.expires_in;
        self.refresh_token = response.refresh_token;
        self.obtained_at = Some(Utc::now());
    }

    /// Updates the access token and lifetime from a refresh response.
    ///
    /// The stored refresh token is left untouched.
    pub fn apply_refresh(&mut self, response: AccessTokenResponse) {
        self.access_token = Some(response.access_token);
        self.expires_in = response.expires_in;
        self.obtained_at = Some(Utc::now());
    }
}
