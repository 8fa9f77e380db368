//! # Cianbox API Rust SDK
//!
//! A Rust SDK for the Cianbox e-commerce/ERP REST API: credential login with
//! access token caching, typed requests to named resources, and a single
//! error type covering transport and application failures.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CianboxConfig`] and [`CianboxConfigBuilder`]
//! - Validated newtypes for credentials and the base URL template
//! - Username/password authentication with a cached access token
//! - Generic `get`/`post`/`put`/`delete` returning the full [`ApiResult`]
//! - Named operations for customers, products, branches, orders, and order statuses
//! - Detection of `{"status": "error"}` envelopes as [`ApiError::Application`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cianbox_api::{CianboxClient, CianboxConfig, Credentials};
//! use serde_json::json;
//!
//! let credentials = Credentials::from_parts("shop1", "api-user", "secret")?;
//! let client = CianboxClient::new(credentials, CianboxConfig::default())?;
//!
//! // Logs in on first use, then reuses the cached token
//! let products = client.list_products(&json!({"page": 1})).await?;
//! let branches = client.list_branches().await?;
//!
//! // Generic verbs return the HTTP status alongside the decoded body
//! let result = client.get("/productos/categorias").await?;
//! println!("{} {}", result.status, result.body);
//! ```
//!
//! ## Custom Requests
//!
//! ```rust,ignore
//! use cianbox_api::clients::RequestSpec;
//!
//! let spec = RequestSpec::builder()
//!     .uri("/clientes/alta")
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .data(json!({"nombre": "Ana"}))
//!     .build();
//! let result = client.post(spec).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and tokens live in client instances
//! - **Fail-fast validation**: newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No hidden retries**: every operation performs at most one request per step

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

pub use auth::{AccessTokenResponse, Credentials, TokenState};
pub use config::{Account, ApiPassword, ApiUser, BaseUrl, CianboxConfig, CianboxConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    ApiError, ApiResult, CianboxClient, ContentKind, HttpClient, HttpMethod, Params,
    PreparedRequest, RequestBody, RequestSpec, RequestSpecBuilder, SDK_VERSION,
};
