//! Named Cianbox resource operations.
//!
//! Each operation is a thin authenticated GET or POST over the generic verbs
//! that returns only the response payload (the envelope's `body` member).

use serde::Serialize;
use serde_json::Value;

use crate::clients::api::CianboxClient;
use crate::clients::http_request::flatten_pairs;
use crate::clients::{ApiError, Params, RequestSpec};

/// Customer list endpoint.
pub const CUSTOMERS_PATH: &str = "/clientes/lista";
/// Order status list endpoint.
pub const ORDER_STATUSES_PATH: &str = "/pedidos/estados/lista";
/// Product list endpoint.
pub const PRODUCTS_PATH: &str = "/productos/lista";
/// Branch list endpoint.
pub const BRANCHES_PATH: &str = "/productos/sucursales";
/// Order creation endpoint.
pub const CREATE_ORDER_PATH: &str = "/pedidos/alta";

impl CianboxClient {
    /// Lists customers matching `filter`.
    ///
    /// `filter` must serialize to a JSON object; each member becomes a
    /// query parameter, with nested arrays and objects in bracket notation
    /// (`ids[0]=1`). An empty object lists without filtering.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] if `filter` is not a mapping
    /// - any error from authentication or the transport
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let customers = client.list_customers(&json!({"email": "ana@example.com"})).await?;
    /// ```
    pub async fn list_customers<F>(&self, filter: &F) -> Result<Value, ApiError>
    where
        F: Serialize + ?Sized,
    {
        let params = filter_params(filter)?;
        self.fetch(CUSTOMERS_PATH, params).await
    }

    /// Lists the order statuses configured for the account.
    ///
    /// # Errors
    ///
    /// Returns any error from authentication or the transport.
    pub async fn list_order_statuses(&self) -> Result<Value, ApiError> {
        self.fetch(ORDER_STATUSES_PATH, Params::new()).await
    }

    /// Lists products matching `filter`.
    ///
    /// Same filter rules as [`list_customers`](Self::list_customers).
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] if `filter` is not a mapping
    /// - any error from authentication or the transport
    pub async fn list_products<F>(&self, filter: &F) -> Result<Value, ApiError>
    where
        F: Serialize + ?Sized,
    {
        let params = filter_params(filter)?;
        self.fetch(PRODUCTS_PATH, params).await
    }

    /// Lists the account's branches.
    ///
    /// # Errors
    ///
    /// Returns any error from authentication or the transport.
    pub async fn list_branches(&self) -> Result<Value, ApiError> {
        self.fetch(BRANCHES_PATH, Params::new()).await
    }

    /// Creates an order.
    ///
    /// `order` is sent as the JSON body and must serialize to an object or
    /// an array.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] if `order` is empty or malformed
    /// - any error from authentication or the transport
    pub async fn create_order<O>(&self, order: &O) -> Result<Value, ApiError>
    where
        O: Serialize + ?Sized,
    {
        let data = serde_json::to_value(order)
            .ok()
            .filter(|value| value.is_object() || value.is_array())
            .ok_or_else(|| ApiError::InvalidArgument {
                message: "Order is empty or malformed".to_string(),
            })?;

        let spec = RequestSpec::from_path(CREATE_ORDER_PATH, Some(data.into()), None);
        Ok(self.post(spec).await?.into_payload())
    }

    async fn fetch(&self, path: &str, params: Params) -> Result<Value, ApiError> {
        let spec = RequestSpec::from_path(path, None, Some(params));
        Ok(self.get(spec).await?.into_payload())
    }
}

/// Converts a search filter into query parameters.
fn filter_params<F>(filter: &F) -> Result<Params, ApiError>
where
    F: Serialize + ?Sized,
{
    serde_json::to_value(filter)
        .ok()
        .as_ref()
        .and_then(flatten_pairs)
        .ok_or_else(|| ApiError::InvalidArgument {
            message: "The search parameter must be a mapping".to_string(),
        })
}
