//! Authentication types for the Cianbox API SDK.
//!
//! - [`Credentials`]: the account, user, and password a client logs in with
//! - [`TokenState`]: the access token cached by a client after logging in
//!
//! The credential exchange itself is performed by
//! [`CianboxClient::authenticate`](crate::clients::api::CianboxClient::authenticate).

mod credentials;
pub mod token;

pub use credentials::Credentials;
pub use token::{AccessTokenResponse, TokenState};
