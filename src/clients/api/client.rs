//! Client implementation for the Cianbox API.
//!
//! This module provides the [`CianboxClient`] type: credential handling,
//! token caching, and the generic verb methods.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::auth::{AccessTokenResponse, Credentials, TokenState};
use crate::clients::http_response::{check_envelope, decode_body};
use crate::clients::{ApiError, ApiResult, HttpClient, HttpMethod, RequestSpec};
use crate::config::CianboxConfig;

/// Path of the credential exchange endpoint.
pub const CREDENTIALS_PATH: &str = "/auth/credentials";

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Request body for the credential exchange.
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    user: &'a str,
    password: &'a str,
    app_name: &'a str,
    app_code: &'a str,
}

/// Request body for a token refresh.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Client for the Cianbox API.
///
/// The client starts unauthenticated. The first call that needs a token
/// performs the credential exchange and caches the result; the cached token
/// is then reused for every later call. The library never checks token
/// expiry on its own and never calls [`refresh`](Self::refresh)
/// automatically.
///
/// # Thread Safety
///
/// `CianboxClient` is `Send + Sync`. The token cache is guarded by an async
/// mutex held across the credential exchange, so concurrent first calls
/// perform a single login.
///
/// # Example
///
/// ```rust,ignore
/// use cianbox_api::{CianboxClient, CianboxConfig, Credentials};
///
/// let credentials = Credentials::from_parts("shop1", "api-user", "secret")?;
/// let client = CianboxClient::new(credentials, CianboxConfig::default())?;
///
/// let token = client.authenticate().await?;
/// let result = client.get("/productos/sucursales").await?;
/// ```
#[derive(Debug)]
pub struct CianboxClient {
    /// The transport used for every request.
    http_client: HttpClient,
    /// Login credentials.
    credentials: Credentials,
    /// Configuration the client was built with.
    config: CianboxConfig,
    /// Cached token fields.
    token: Mutex<TokenState>,
}

// Verify CianboxClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CianboxClient>();
};

impl CianboxClient {
    /// Creates a new client for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the transport cannot be built from
    /// `config`.
    pub fn new(credentials: Credentials, config: CianboxConfig) -> Result<Self, ApiError> {
        let http_client = HttpClient::new(&config)?;

        Ok(Self {
            http_client,
            credentials,
            config,
            token: Mutex::new(TokenState::default()),
        })
    }

    /// Returns the client's credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the client's configuration.
    #[must_use]
    pub const fn config(&self) -> &CianboxConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns a snapshot of the cached token fields.
    pub async fn token_state(&self) -> TokenState {
        self.token.lock().await.clone()
    }

    /// Returns the access token, logging in first if none is cached.
    ///
    /// While a token is cached this returns it without any network call,
    /// whether or not it has expired.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] if the credential exchange does not return HTTP 200
    /// - [`ApiError::InvalidPayload`] if a successful response carries no access token
    /// - any transport or envelope error from the exchange
    pub async fn authenticate(&self) -> Result<String, ApiError> {
        let mut token = self.token.lock().await;
        if let Some(access_token) = &token.access_token {
            return Ok(access_token.clone());
        }

        let body = CredentialsRequest {
            user: self.credentials.user().as_ref(),
            password: self.credentials.password().as_ref(),
            app_name: self.config.app_name(),
            app_code: self.config.app_code(),
        };
        let result = self.exchange(CREDENTIALS_PATH, &body).await?;

        if result.status != 200 {
            tracing::warn!(
                account = %self.credentials.account(),
                status = result.status,
                "Cianbox credential exchange rejected"
            );
            return Err(ApiError::Authentication {
                status: result.status,
            });
        }

        let response = token_response(result)?;
        let access_token = response.access_token.clone();
        token.apply_credentials(response);

        tracing::info!(account = %self.credentials.account(), "Authenticated with Cianbox API");

        Ok(access_token)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// On success the cached access token and lifetime are replaced; the
    /// cached refresh token is kept. Success means HTTP 200 from the refresh
    /// endpoint (error envelopes are already rejected by the transport).
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingField`] (code 400) if `refresh_token` is empty
    /// - [`ApiError::Authentication`] if the endpoint does not return HTTP 200
    /// - [`ApiError::InvalidPayload`] if a successful response carries no access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        if refresh_token.is_empty() {
            return Err(ApiError::MissingField {
                field: "refresh token",
                code: 400,
            });
        }

        let result = self
            .exchange(REFRESH_PATH, &RefreshRequest { refresh_token })
            .await?;

        if result.status != 200 {
            return Err(ApiError::Authentication {
                status: result.status,
            });
        }

        let response = token_response(result)?;
        let access_token = response.access_token.clone();
        self.token.lock().await.apply_refresh(response);

        tracing::info!(account = %self.credentials.account(), "Refreshed Cianbox access token");

        Ok(access_token)
    }

    /// Sends a GET request.
    ///
    /// `target` is a bare path or a [`RequestSpec`]. Unless the spec
    /// disables authentication, `access_token` is added to its query
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] raised by authentication or the transport.
    /// HTTP error statuses are returned inside the [`ApiResult`].
    pub async fn get(&self, target: impl Into<RequestSpec>) -> Result<ApiResult, ApiError> {
        self.send(HttpMethod::Get, target.into()).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post(&self, target: impl Into<RequestSpec>) -> Result<ApiResult, ApiError> {
        self.send(HttpMethod::Post, target.into()).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn put(&self, target: impl Into<RequestSpec>) -> Result<ApiResult, ApiError> {
        self.send(HttpMethod::Put, target.into()).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn delete(&self, target: impl Into<RequestSpec>) -> Result<ApiResult, ApiError> {
        self.send(HttpMethod::Delete, target.into()).await
    }

    async fn send(&self, method: HttpMethod, mut spec: RequestSpec) -> Result<ApiResult, ApiError> {
        spec.method = Some(method);
        if spec.account.is_none() {
            spec.account = Some(self.credentials.account().to_string());
        }

        if spec.authenticate {
            let access_token = self.authenticate().await?;
            spec.params.insert("access_token".to_string(), access_token);
        }

        self.http_client.execute(&spec).await
    }

    /// Posts a JSON body to an unauthenticated auth endpoint.
    ///
    /// A rejected exchange is reported by status even when its body is not
    /// JSON; a non-JSON body on HTTP 200 is still an invalid payload.
    async fn exchange<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResult, ApiError> {
        let data = serde_json::to_value(body).map_err(|e| ApiError::InvalidPayload {
            reason: e.to_string(),
            data: String::new(),
        })?;

        let spec = RequestSpec::builder()
            .method(HttpMethod::Post)
            .account(self.credentials.account().to_string())
            .uri(path)
            .header("content-type", "application/json")
            .data(data)
            .authenticate(false)
            .build();

        let (status, text) = self.http_client.dispatch(&spec).await?;
        let body = match decode_body(&text) {
            Ok(body) => body,
            Err(_) if status != 200 => return Err(ApiError::Authentication { status }),
            Err(error) => return Err(error),
        };
        check_envelope(&body)?;

        Ok(ApiResult::new(status, body))
    }
}

/// Reads the token fields from an auth endpoint result.
fn token_response(result: ApiResult) -> Result<AccessTokenResponse, ApiError> {
    let payload = result.into_payload();
    AccessTokenResponse::deserialize(&payload).map_err(|e| ApiError::InvalidPayload {
        reason: e.to_string(),
        data: payload.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CianboxClient {
        let config = CianboxConfig::builder()
            .base_url(BaseUrl::new(format!("{}/{{account}}/api/v2", server.uri())).unwrap())
            .build()
            .unwrap();
        let credentials = Credentials::from_parts("shop1", "u", "p").unwrap();
        CianboxClient::new(credentials, config).unwrap()
    }

    #[test]
    fn test_credentials_request_serializes_all_fields() {
        let request = CredentialsRequest {
            user: "u",
            password: "p",
            app_name: "Cianbox Rust SDK v0.1.0",
            app_code: "cianbox-rust-sdk-v0-1-0",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user": "u",
                "password": "p",
                "app_name": "Cianbox Rust SDK v0.1.0",
                "app_code": "cianbox-rust-sdk-v0-1-0"
            })
        );
    }

    #[test]
    fn test_token_response_reads_enveloped_and_bare_payloads() {
        let enveloped = ApiResult::new(
            200,
            json!({"status": "ok", "body": {"access_token": "T1", "expires_in": 60}}),
        );
        assert_eq!(token_response(enveloped).unwrap().access_token, "T1");

        let bare = ApiResult::new(200, json!({"access_token": "T2"}));
        assert_eq!(token_response(bare).unwrap().access_token, "T2");

        let missing = ApiResult::new(200, json!({"status": "ok"}));
        assert!(matches!(
            token_response(missing),
            Err(ApiError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CianboxClient>();
    }

    #[tokio::test]
    async fn test_authenticate_posts_credentials_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shop1/api/v2/auth/credentials"))
            .and(body_json(json!({
                "user": "u",
                "password": "p",
                "app_name": crate::config::DEFAULT_APP_NAME,
                "app_code": crate::config::DEFAULT_APP_CODE
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "body": {"access_token": "T1", "expires_in": 3600, "refresh_token": "R1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.authenticate().await.unwrap(), "T1");
        assert_eq!(client.authenticate().await.unwrap(), "T1");

        let state = client.token_state().await;
        assert_eq!(state.expires_in, Some(3600));
        assert_eq!(state.refresh_token.as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn test_refresh_rejects_empty_token_without_io() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = client.refresh("").await;
        assert!(matches!(
            result,
            Err(ApiError::MissingField { code: 400, .. })
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_injects_token_and_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shop1/api/v2/auth/credentials"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "T1"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/shop1/api/v2/pedidos/9"))
            .and(query_param("access_token", "T1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.delete("/pedidos/9").await.unwrap();
        assert_eq!(result.status, 200);
    }
}
