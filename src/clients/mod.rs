//! HTTP client types for Cianbox API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: The transport turning a [`RequestSpec`] into one HTTP call
//! - [`RequestSpec`]: A description of a single call, built with [`RequestSpecBuilder`]
//! - [`ApiResult`]: The decoded status and JSON body of a response
//! - [`ApiError`]: The single error type of every operation
//! - [`api::CianboxClient`]: Credential handling, generic verbs, and named resources
//!
//! # Error Envelopes
//!
//! Cianbox reports application failures inside a JSON envelope:
//!
//! ```json
//! {"status": "error", "message": "Bad", "cause": {"code": "E1", "description": "Oops"}}
//! ```
//!
//! The transport turns such a body into [`ApiError::Application`] with the
//! message `"error: Bad - E1: Oops"`, even when the HTTP status is 200.
//!
//! # Example
//!
//! ```rust
//! use cianbox_api::clients::{HttpClient, HttpMethod, RequestSpec};
//! use cianbox_api::CianboxConfig;
//!
//! let transport = HttpClient::new(&CianboxConfig::default()).unwrap();
//! let spec = RequestSpec::builder()
//!     .method(HttpMethod::Get)
//!     .account("shop1")
//!     .uri("/productos/lista")
//!     .param("page", "1")
//!     .build();
//!
//! let prepared = transport.prepare(&spec).unwrap();
//! assert_eq!(prepared.url, "https://cianbox.org/shop1/api/v2/productos/lista?page=1");
//! ```

pub mod api;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::ApiError;
pub use http_client::{HttpClient, PreparedRequest, SDK_VERSION};
pub use http_request::{
    encode_pairs, encode_query, ContentKind, HttpMethod, Params, RequestBody, RequestSpec,
    RequestSpecBuilder,
};
pub use http_response::ApiResult;

pub use api::CianboxClient;
