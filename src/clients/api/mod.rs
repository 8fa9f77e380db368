//! High-level Cianbox API client.
//!
//! [`CianboxClient`] owns the credentials and the cached access token, and
//! offers three layers of operations:
//!
//! - Authentication: [`CianboxClient::authenticate`], [`CianboxClient::refresh`]
//! - Generic verbs returning the full [`ApiResult`](crate::clients::ApiResult):
//!   [`CianboxClient::get`], [`CianboxClient::post`], [`CianboxClient::put`],
//!   [`CianboxClient::delete`]
//! - Named resource operations returning the unwrapped payload, such as
//!   [`CianboxClient::list_products`] and [`CianboxClient::create_order`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cianbox_api::{CianboxClient, CianboxConfig, Credentials};
//! use serde_json::json;
//!
//! let credentials = Credentials::from_parts("shop1", "api-user", "secret")?;
//! let client = CianboxClient::new(credentials, CianboxConfig::default())?;
//!
//! // Named operation: returns the envelope's `body`
//! let products = client.list_products(&json!({"page": 1})).await?;
//!
//! // Generic verb: returns status and full body
//! let result = client.get("/productos/categorias").await?;
//! println!("{} {}", result.status, result.body);
//! ```

mod client;
mod resources;

pub use client::{CianboxClient, CREDENTIALS_PATH, REFRESH_PATH};
pub use resources::{
    BRANCHES_PATH, CREATE_ORDER_PATH, CUSTOMERS_PATH, ORDER_STATUSES_PATH, PRODUCTS_PATH,
};
