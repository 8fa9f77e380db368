//! Login credentials for a Cianbox account.

use crate::config::{Account, ApiPassword, ApiUser};
use crate::error::ConfigError;

/// The account, user, and password used for the credential exchange.
///
/// Credentials are immutable once constructed. The password is masked in
/// `Debug` output.
///
/// # Example
///
/// ```rust
/// use cianbox_api::Credentials;
///
/// let credentials = Credentials::from_parts("shop1", "api-user", "secret").unwrap();
/// assert_eq!(credentials.account().as_ref(), "shop1");
/// assert!(!format!("{credentials:?}").contains("secret"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    account: Account,
    user: ApiUser,
    password: ApiPassword,
}

impl Credentials {
    /// Creates credentials from validated parts.
    #[must_use]
    pub const fn new(account: Account, user: ApiUser, password: ApiPassword) -> Self {
        Self {
            account,
            user,
            password,
        }
    }

    /// Creates credentials from raw strings, validating each one.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the first invalid part.
    pub fn from_parts(
        account: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Account::new(account)?,
            ApiUser::new(user)?,
            ApiPassword::new(password)?,
        ))
    }

    /// Returns the account.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the user.
    #[must_use]
    pub const fn user(&self) -> &ApiUser {
        &self.user
    }

    /// Returns the password.
    #[must_use]
    pub const fn password(&self) -> &ApiPassword {
        &self.password
    }
}
