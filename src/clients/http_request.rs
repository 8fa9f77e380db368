//! Request types for the Cianbox API SDK.
//!
//! This module provides [`RequestSpec`], the description of a single API
//! call, its builder, and the encoding helpers shared by query strings and
//! form bodies.

use std::fmt;

use serde_json::Value;

use crate::clients::errors::ApiError;

/// Query parameters of a request, serialized in insertion order.
///
/// Inserting an existing key replaces its value in place, so a parameter
/// keeps the position it was first given.
///
/// # Example
///
/// ```rust
/// use cianbox_api::Params;
///
/// let mut params: Params = [("page", "1"), ("q", "vino")].into_iter().collect();
/// params.insert("page", "2");
/// params.insert("access_token", "T1");
///
/// let keys: Vec<_> = params.iter().map(|(key, _)| key).collect();
/// assert_eq!(keys, ["page", "q", "access_token"]);
/// assert_eq!(params.get("page"), Some("2"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// HTTP methods supported by the Cianbox API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a request body is encoded, derived from the `content-type` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/json` (also the default when no content type is given).
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
    /// Any other content type; the body is sent as-is.
    Other,
}

impl ContentKind {
    /// JSON MIME type.
    pub const JSON: &'static str = "application/json";
    /// Form MIME type.
    pub const FORM: &'static str = "application/x-www-form-urlencoded";

    /// Classifies a lower-cased `content-type` value.
    #[must_use]
    pub fn from_content_type(value: &str) -> Self {
        match value {
            Self::JSON => Self::Json,
            Self::FORM => Self::Form,
            _ => Self::Other,
        }
    }
}

/// A request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Pre-serialized text, sent byte-for-byte.
    Text(String),
    /// A structured value, serialized according to the [`ContentKind`].
    Value(Value),
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Description of a single Cianbox API call.
///
/// `method`, `account`, and `uri` are optional so that the transport can
/// report their absence as [`ApiError::MissingField`]. The client's verb
/// methods fill `method` and, when unset, `account`.
///
/// # Example
///
/// ```rust
/// use cianbox_api::clients::{HttpMethod, RequestSpec};
/// use serde_json::json;
///
/// let spec = RequestSpec::builder()
///     .method(HttpMethod::Post)
///     .account("shop1")
///     .uri("/pedidos/alta")
///     .param("dry_run", "1")
///     .data(json!({"cliente": 10}))
///     .build();
///
/// assert_eq!(spec.uri.as_deref(), Some("/pedidos/alta"));
/// assert!(spec.authenticate);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: Option<HttpMethod>,
    /// The account substituted into the base URL.
    pub account: Option<String>,
    /// The path appended to the base URL; may already carry a query string.
    pub uri: Option<String>,
    /// Query parameters.
    pub params: Params,
    /// The request body, if any.
    pub data: Option<RequestBody>,
    /// Caller headers, in order.
    pub headers: Vec<(String, String)>,
    /// Whether the client injects `access_token` into `params`.
    pub authenticate: bool,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            method: None,
            account: None,
            uri: None,
            params: Params::new(),
            data: None,
            headers: Vec::new(),
            authenticate: true,
        }
    }
}

impl RequestSpec {
    /// Creates a new builder for constructing a `RequestSpec`.
    #[must_use]
    pub fn builder() -> RequestSpecBuilder {
        RequestSpecBuilder::default()
    }

    /// Creates an authenticated spec for a bare path.
    ///
    /// Absent `params` become an empty map.
    #[must_use]
    pub fn from_path(
        path: impl Into<String>,
        data: Option<RequestBody>,
        params: Option<Params>,
    ) -> Self {
        Self {
            uri: Some(path.into()),
            params: params.unwrap_or_default(),
            data,
            ..Self::default()
        }
    }

    /// Derives the body encoding from the caller headers.
    ///
    /// Header names are compared case-insensitively; the last `content-type`
    /// wins.
    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        self.headers
            .iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map_or(ContentKind::Json, |(_, value)| {
                ContentKind::from_content_type(&value.to_lowercase())
            })
    }
}

impl From<&str> for RequestSpec {
    fn from(path: &str) -> Self {
        Self::from_path(path, None, None)
    }
}

impl From<String> for RequestSpec {
    fn from(path: String) -> Self {
        Self::from_path(path, None, None)
    }
}

impl From<RequestSpecBuilder> for RequestSpec {
    fn from(builder: RequestSpecBuilder) -> Self {
        builder.build()
    }
}

/// Builder for constructing [`RequestSpec`] instances.
#[derive(Debug, Default)]
pub struct RequestSpecBuilder {
    spec: RequestSpec,
}

impl RequestSpecBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.spec.method = Some(method);
        self
    }

    /// Sets the account.
    #[must_use]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.spec.account = Some(account.into());
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.spec.uri = Some(uri.into());
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.spec.params = params;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.params.insert(key, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn data(mut self, data: impl Into<RequestBody>) -> Self {
        self.spec.data = Some(data.into());
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.headers.push((name.into(), value.into()));
        self
    }

    /// Sets whether `access_token` is injected (default `true`).
    #[must_use]
    pub const fn authenticate(mut self, authenticate: bool) -> Self {
        self.spec.authenticate = authenticate;
        self
    }

    /// Builds the [`RequestSpec`].
    #[must_use]
    pub fn build(self) -> RequestSpec {
        self.spec
    }
}

/// Serializes pairs as `key=value` joined by `&`, percent-encoding both sides.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Serializes query parameters in insertion order.
#[must_use]
pub fn encode_query(params: &Params) -> String {
    encode_pairs(params.iter())
}

/// Flattens a JSON object into query pairs.
///
/// Nested arrays and objects use bracket notation (`ids[0]=1`,
/// `cliente[id]=5`), booleans become `1`/`0`, and `null` members are
/// skipped. Returns `None` when `value` is not an object.
pub(crate) fn flatten_pairs(value: &Value) -> Option<Params> {
    let object = value.as_object()?;
    let mut params = Params::new();
    for (key, member) in object {
        flatten_into(&mut params, key.clone(), member);
    }
    Some(params)
}

fn flatten_into(params: &mut Params, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            params.insert(key, if *flag { "1" } else { "0" });
        }
        Value::Number(number) => {
            params.insert(key, number.to_string());
        }
        Value::String(text) => {
            params.insert(key, text.as_str());
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(params, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(members) => {
            for (name, member) in members {
                flatten_into(params, format!("{key}[{name}]"), member);
            }
        }
    }
}

/// Encodes `data` for the wire according to `kind`.
///
/// JSON text is validated but sent unchanged; JSON values are serialized.
/// Form objects are flattened like query parameters and form text is sent
/// unchanged. Other kinds pass text through and send values as JSON.
pub(crate) fn encode_body(data: &RequestBody, kind: ContentKind) -> Result<String, ApiError> {
    match (kind, data) {
        (ContentKind::Json, RequestBody::Text(text)) => {
            serde_json::from_str::<Value>(text).map_err(|e| ApiError::InvalidPayload {
                reason: e.to_string(),
                data: text.clone(),
            })?;
            Ok(text.clone())
        }
        (ContentKind::Json | ContentKind::Other, RequestBody::Value(value)) => {
            Ok(value.to_string())
        }
        (ContentKind::Form, RequestBody::Value(value)) => flatten_pairs(value)
            .map(|pairs| encode_query(&pairs))
            .ok_or_else(|| ApiError::InvalidPayload {
                reason: "form data must be an object".to_string(),
                data: value.to_string(),
            }),
        (ContentKind::Form | ContentKind::Other, RequestBody::Text(text)) => Ok(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_content_kind_classification_is_exact() {
        assert_eq!(
            ContentKind::from_content_type("application/json"),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_content_type("application/x-www-form-urlencoded"),
            ContentKind::Form
        );
        assert_eq!(
            ContentKind::from_content_type("application/json; charset=utf-8"),
            ContentKind::Other
        );
        assert_eq!(ContentKind::from_content_type("text/plain"), ContentKind::Other);
    }

    #[test]
    fn test_content_kind_defaults_to_json() {
        let spec = RequestSpec::from_path("/x", None, None);
        assert_eq!(spec.content_kind(), ContentKind::Json);
    }

    #[test]
    fn test_content_kind_reads_caller_header_case_insensitively() {
        let spec = RequestSpec::builder()
            .header("Content-Type", "Application/X-WWW-Form-Urlencoded")
            .build();
        assert_eq!(spec.content_kind(), ContentKind::Form);
    }

    #[test]
    fn test_from_path_defaults() {
        let spec = RequestSpec::from_path("/productos/lista", None, None);
        assert_eq!(spec.uri.as_deref(), Some("/productos/lista"));
        assert!(spec.method.is_none());
        assert!(spec.account.is_none());
        assert!(spec.params.is_empty());
        assert!(spec.data.is_none());
        assert!(spec.authenticate);
    }

    #[test]
    fn test_string_conversions_produce_path_specs() {
        let spec: RequestSpec = "/x".into();
        assert_eq!(spec, RequestSpec::from_path("/x", None, None));

        let spec: RequestSpec = String::from("/y").into();
        assert_eq!(spec.uri.as_deref(), Some("/y"));
    }

    #[test]
    fn test_builder_sets_every_field() {
        let spec = RequestSpec::builder()
            .method(HttpMethod::Put)
            .account("shop1")
            .uri("/pedidos/1")
            .param("a", "1")
            .data("{}")
            .header("x-trace", "abc")
            .authenticate(false)
            .build();

        assert_eq!(spec.method, Some(HttpMethod::Put));
        assert_eq!(spec.account.as_deref(), Some("shop1"));
        assert_eq!(spec.params.get("a"), Some("1"));
        assert_eq!(spec.data, Some(RequestBody::Text("{}".to_string())));
        assert_eq!(spec.headers, vec![("x-trace".to_string(), "abc".to_string())]);
        assert!(!spec.authenticate);
    }

    #[test]
    fn test_encode_query_percent_encodes_in_insertion_order() {
        let mut params = Params::new();
        params.insert("q", "café & té");
        params.insert("access_token", "a/b=c");

        assert_eq!(
            encode_query(&params),
            "q=caf%C3%A9%20%26%20t%C3%A9&access_token=a%2Fb%3Dc"
        );
        assert_eq!(encode_query(&Params::new()), "");
    }

    #[test]
    fn test_params_insert_replaces_in_place() {
        let mut params: Params = [("page", "1"), ("access_token", "old")].into_iter().collect();
        assert_eq!(params.insert("access_token", "new"), Some("old".to_string()));
        assert_eq!(params.insert("q", "x"), None);

        assert_eq!(params.len(), 3);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("page", "1"), ("access_token", "new"), ("q", "x")]
        );
    }

    #[test]
    fn test_flatten_pairs_renders_scalars() {
        let pairs =
            flatten_pairs(&json!({"page": 2, "activo": true, "borrado": false, "q": "x", "skip": null}))
                .unwrap();
        assert_eq!(
            pairs.iter().collect::<Vec<_>>(),
            vec![("page", "2"), ("activo", "1"), ("borrado", "0"), ("q", "x")]
        );

        assert!(flatten_pairs(&json!({})).unwrap().is_empty());
        assert!(flatten_pairs(&json!([1, 2])).is_none());
        assert!(flatten_pairs(&json!("page=1")).is_none());
    }

    #[test]
    fn test_flatten_pairs_uses_bracket_notation_for_nesting() {
        let pairs = flatten_pairs(&json!({
            "ids": [1, 2],
            "cliente": {"id": 5, "tags": ["a"], "nota": null},
            "vacio": []
        }))
        .unwrap();

        assert_eq!(
            encode_query(&pairs),
            "ids%5B0%5D=1&ids%5B1%5D=2&cliente%5Bid%5D=5&cliente%5Btags%5D%5B0%5D=a"
        );
    }

    #[test]
    fn test_json_text_is_sent_byte_for_byte() {
        let text = "{ \"b\" : 1,\n  \"a\":[ 1,2 ] }";
        let body = encode_body(&RequestBody::Text(text.to_string()), ContentKind::Json).unwrap();
        assert_eq!(body, text);
    }

    #[test]
    fn test_invalid_json_text_is_rejected_with_data() {
        let result = encode_body(&RequestBody::Text("{oops".to_string()), ContentKind::Json);
        match result {
            Err(ApiError::InvalidPayload { data, .. }) => assert_eq!(data, "{oops"),
            other => panic!("Expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_json_value_round_trips() {
        let value = json!({"cliente": {"id": 5}, "items": [1, 2, 3], "nota": "ñ"});
        let body = encode_body(&RequestBody::Value(value.clone()), ContentKind::Json).unwrap();
        let decoded: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_form_value_is_url_encoded() {
        let body = encode_body(
            &RequestBody::Value(json!({"user": "u 1", "n": 3})),
            ContentKind::Form,
        )
        .unwrap();
        assert_eq!(body, "user=u%201&n=3");
    }

    #[test]
    fn test_form_value_flattens_nested_members() {
        let body = encode_body(
            &RequestBody::Value(json!({"pedido": {"items": [7, 8]}})),
            ContentKind::Form,
        )
        .unwrap();
        assert_eq!(body, "pedido%5Bitems%5D%5B0%5D=7&pedido%5Bitems%5D%5B1%5D=8");
    }

    #[test]
    fn test_form_rejects_non_object_values() {
        let result = encode_body(&RequestBody::Value(json!([1, 2])), ContentKind::Form);
        assert!(matches!(result, Err(ApiError::InvalidPayload { .. })));
    }

    #[test]
    fn test_form_and_other_text_pass_through() {
        let form = encode_body(&RequestBody::Text("a=1&b=2".to_string()), ContentKind::Form);
        assert_eq!(form.unwrap(), "a=1&b=2");

        let other = encode_body(&RequestBody::Text("<xml/>".to_string()), ContentKind::Other);
        assert_eq!(other.unwrap(), "<xml/>");
    }
}
