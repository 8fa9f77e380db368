//! HTTP transport for Cianbox API communication.
//!
//! This module provides the [`HttpClient`] type, which turns one
//! [`RequestSpec`] into exactly one outbound HTTP call and turns the response
//! into an [`ApiResult`] or an [`ApiError`].

use crate::clients::errors::ApiError;
use crate::clients::http_request::{encode_body, encode_query, ContentKind, HttpMethod, RequestSpec};
use crate::clients::http_response::{check_envelope, decode_body, ApiResult};
use crate::config::{BaseUrl, CianboxConfig};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A fully assembled request, ready to be sent.
///
/// Produced by [`HttpClient::prepare`]; exposes exactly what goes on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The complete URL, including the query string.
    pub url: String,
    /// Headers in send order, lower-cased.
    pub headers: Vec<(String, String)>,
    /// The negotiated body encoding.
    pub content_kind: ContentKind,
    /// The encoded body, if any.
    pub body: Option<String>,
}

/// HTTP transport for the Cianbox API.
///
/// The transport handles:
/// - URL assembly from the base URL template and the request account
/// - Query string encoding
/// - `accept`/`content-type` negotiation
/// - JSON and form body encoding
/// - Error envelope detection
///
/// Requests are sent once; there is no retry.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use cianbox_api::clients::{HttpClient, HttpMethod, RequestSpec};
/// use cianbox_api::CianboxConfig;
///
/// let transport = HttpClient::new(&CianboxConfig::default())?;
/// let spec = RequestSpec::builder()
///     .method(HttpMethod::Get)
///     .account("shop1")
///     .uri("/productos/lista")
///     .param("access_token", token)
///     .build();
///
/// let result = transport.execute(&spec).await?;
/// println!("{}", result.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL template containing the account placeholder.
    base_url: BaseUrl,
    /// `User-Agent` sent with every request.
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if a configured CA certificate cannot be
    /// loaded or the TLS stack fails to initialize.
    pub fn new(config: &CianboxConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if !config.ca_certificates().is_empty() {
            builder = builder.tls_built_in_root_certs(false);
            for pem in config.ca_certificates() {
                let certificate = reqwest::Certificate::from_pem(pem).map_err(|e| {
                    ConfigError::InvalidCaCertificate {
                        reason: e.to_string(),
                    }
                })?;
                builder = builder.add_root_certificate(certificate);
            }
        }

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ConfigError::TransportInit {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            user_agent: config.user_agent(),
        })
    }

    /// Returns the base URL template for this transport.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Assembles the URL, headers, and body for `spec` without any I/O.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] if the method, account, or URI is absent
    /// - [`ApiError::InvalidPayload`] if the body cannot be encoded
    pub fn prepare(&self, spec: &RequestSpec) -> Result<PreparedRequest, ApiError> {
        let method = spec.method.ok_or(ApiError::missing_field("HTTP METHOD"))?;
        let account = spec
            .account
            .as_deref()
            .filter(|account| !account.is_empty())
            .ok_or(ApiError::missing_field("account"))?;
        let uri = spec.uri.as_deref().ok_or(ApiError::missing_field("URI"))?;

        let content_kind = spec.content_kind();
        let mut headers = vec![("accept".to_string(), ContentKind::JSON.to_string())];
        let mut explicit_content_type = false;
        for (name, value) in &spec.headers {
            let name = name.to_lowercase();
            explicit_content_type |= name == "content-type";
            headers.push((name, value.to_lowercase()));
        }
        if !explicit_content_type {
            headers.push(("content-type".to_string(), ContentKind::JSON.to_string()));
        }

        let mut url = self.base_url.for_account(account);
        url.push_str(uri);
        if !spec.params.is_empty() {
            url.push(if uri.contains('?') { '&' } else { '?' });
            url.push_str(&encode_query(&spec.params));
        }

        let body = spec
            .data
            .as_ref()
            .map(|data| encode_body(data, content_kind))
            .transpose()?;

        Ok(PreparedRequest {
            method,
            url,
            headers,
            content_kind,
            body,
        })
    }

    /// Sends the request described by `spec`.
    ///
    /// A response whose JSON body has `status: "error"` is reported as
    /// [`ApiError::Application`] whatever its HTTP status. Other statuses are
    /// not interpreted.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] / [`ApiError::InvalidPayload`] from [`Self::prepare`]
    /// - [`ApiError::Transport`] if the request cannot be completed
    /// - [`ApiError::InvalidPayload`] if a non-empty response is not JSON
    /// - [`ApiError::Application`] for an error envelope
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ApiResult, ApiError> {
        let (status, text) = self.dispatch(spec).await?;
        let body = decode_body(&text)?;
        check_envelope(&body)?;
        Ok(ApiResult::new(status, body))
    }

    /// Sends the request and returns the status with the undecoded body.
    ///
    /// Callers that must classify a response by status before its body is
    /// known to be JSON use this instead of [`Self::execute`].
    pub(crate) async fn dispatch(&self, spec: &RequestSpec) -> Result<(u16, String), ApiError> {
        let prepared = self.prepare(spec)?;

        let mut req_builder = match prepared.method {
            HttpMethod::Get => self.client.get(&prepared.url),
            HttpMethod::Post => self.client.post(&prepared.url),
            HttpMethod::Put => self.client.put(&prepared.url),
            HttpMethod::Delete => self.client.delete(&prepared.url),
        };

        req_builder = req_builder.header(reqwest::header::USER_AGENT, &self.user_agent);
        for (name, value) in &prepared.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = prepared.body {
            req_builder = req_builder.body(body);
        }

        let path = redact_query(&prepared.url);
        tracing::debug!(method = %prepared.method, url = %path, "Sending Cianbox API request");

        let response = req_builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(method = %prepared.method, url = %path, status, "Received Cianbox API response");

        Ok((status, text))
    }
}

/// Strips the query string so access tokens never reach the logs.
fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::RequestBody;
    use serde_json::json;

    fn transport() -> HttpClient {
        HttpClient::new(&CianboxConfig::default()).unwrap()
    }

    fn get_spec(uri: &str) -> RequestSpec {
        RequestSpec::builder()
            .method(HttpMethod::Get)
            .account("shop1")
            .uri(uri)
            .build()
    }

    #[test]
    fn test_missing_method_account_or_uri_fails_before_io() {
        let client = transport();

        let no_method = RequestSpec::builder().account("a").uri("/x").build();
        assert!(matches!(
            client.prepare(&no_method),
            Err(ApiError::MissingField { field: "HTTP METHOD", .. })
        ));

        let no_account = RequestSpec::builder().method(HttpMethod::Get).uri("/x").build();
        assert!(matches!(
            client.prepare(&no_account),
            Err(ApiError::MissingField { field: "account", .. })
        ));

        let empty_account = RequestSpec::builder()
            .method(HttpMethod::Get)
            .account("")
            .uri("/x")
            .build();
        assert!(matches!(
            client.prepare(&empty_account),
            Err(ApiError::MissingField { field: "account", .. })
        ));

        let no_uri = RequestSpec::builder().method(HttpMethod::Get).account("a").build();
        assert!(matches!(
            client.prepare(&no_uri),
            Err(ApiError::MissingField { field: "URI", .. })
        ));
    }

    #[test]
    fn test_url_substitutes_account_and_appends_uri() {
        let prepared = transport().prepare(&get_spec("/productos/lista")).unwrap();
        assert_eq!(prepared.url, "https://cianbox.org/shop1/api/v2/productos/lista");
    }

    #[test]
    fn test_query_uses_ampersand_when_uri_has_query() {
        let spec = RequestSpec::builder()
            .method(HttpMethod::Get)
            .account("shop1")
            .uri("/productos/lista?page=2")
            .param("limit", "10")
            .build();
        let prepared = transport().prepare(&spec).unwrap();
        assert_eq!(
            prepared.url,
            "https://cianbox.org/shop1/api/v2/productos/lista?page=2&limit=10"
        );
    }

    #[test]
    fn test_default_headers_when_caller_sends_none() {
        let prepared = transport().prepare(&get_spec("/x")).unwrap();
        assert_eq!(
            prepared.headers,
            vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ]
        );
        assert_eq!(prepared.content_kind, ContentKind::Json);
        assert!(prepared.body.is_none());
    }

    #[test]
    fn test_caller_headers_are_lowercased_and_override_content_kind() {
        let spec = RequestSpec::builder()
            .method(HttpMethod::Post)
            .account("shop1")
            .uri("/x")
            .header("X-Trace-Id", "ABC")
            .header("Content-Type", "Application/X-WWW-Form-Urlencoded")
            .data(json!({"a": "1 2"}))
            .build();
        let prepared = transport().prepare(&spec).unwrap();

        assert_eq!(
            prepared.headers,
            vec![
                ("accept".to_string(), "application/json".to_string()),
                ("x-trace-id".to_string(), "abc".to_string()),
                (
                    "content-type".to_string(),
                    "application/x-www-form-urlencoded".to_string()
                ),
            ]
        );
        assert_eq!(prepared.content_kind, ContentKind::Form);
        assert_eq!(prepared.body.as_deref(), Some("a=1%202"));
    }

    #[test]
    fn test_unknown_content_type_sends_text_as_is() {
        let spec = RequestSpec::builder()
            .method(HttpMethod::Put)
            .account("shop1")
            .uri("/x")
            .header("content-type", "text/plain")
            .data(RequestBody::Text("not json".to_string()))
            .build();
        let prepared = transport().prepare(&spec).unwrap();
        assert_eq!(prepared.content_kind, ContentKind::Other);
        assert_eq!(prepared.body.as_deref(), Some("not json"));
    }

    #[test]
    fn test_redact_query_strips_token() {
        assert_eq!(
            redact_query("https://cianbox.org/a/api/v2/x?access_token=secret"),
            "https://cianbox.org/a/api/v2/x"
        );
        assert_eq!(redact_query("https://cianbox.org/a"), "https://cianbox.org/a");
    }

    #[test]
    fn test_user_agent_identifies_sdk() {
        let client = transport();
        assert!(client.user_agent().contains("Cianbox API Library v"));
        assert!(client.user_agent().contains(SDK_VERSION));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
