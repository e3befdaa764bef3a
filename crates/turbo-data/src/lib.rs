//! HTTP and GraphQL client utilities for TurboCommerce.
//!
//! Provides a small builder API for outbound requests from Spin WASM
//! components, plus the GraphQL `{query, variables}` / `{data, errors}`
//! envelopes used by the catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{FetchClient, GraphqlRequest, GraphqlResponse};
//!
//! let request = GraphqlRequest::new(DOCUMENT, "ProductListPaginated", variables);
//!
//! let response = FetchClient::new()
//!     .graphql("https://shop.example.com/graphql/", &request)?
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! let envelope: GraphqlResponse<ProductsData> = serde_json::from_slice(&response.body)?;
//! ```

mod error;
mod graphql;
mod request;
mod response;

pub use error::FetchError;
pub use graphql::{join_errors, GraphqlError, GraphqlRequest, GraphqlResponse};
pub use request::{Method, RequestBuilder};
pub use response::Response;

use serde::Serialize;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a POST carrying a GraphQL operation.
    pub fn graphql<V: Serialize>(
        &self,
        url: impl Into<String>,
        request: &GraphqlRequest<V>,
    ) -> Result<ClientRequestBuilder, FetchError> {
        self.post(url)
            .header("Accept", "application/json")
            .json(request)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            builder: RequestBuilder::new(method, url),
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug, Clone)]
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Inspect the underlying request.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    #[cfg(target_arch = "wasm32")]
    pub async fn send(self) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};
        use std::collections::HashMap;

        let method = match self.builder.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
        };

        let mut request = Request::builder();
        request.method(method).uri(&self.builder.url);
        for (key, value) in &self.builder.headers {
            request.header(key.as_str(), value.as_str());
        }
        let request = request.body(self.builder.body.unwrap_or_default()).build();

        let response: spin_sdk::http::Response = spin_sdk::http::send(request)
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.to_string(), v.to_string())))
            .collect();

        Ok(Response::new(status, headers, response.into_body()))
    }

    /// Send the request and return the response.
    ///
    /// Outbound HTTP goes through the Spin host; native builds refuse.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn send(self) -> Result<Response, FetchError> {
        Err(FetchError::Unsupported(format!(
            "{} {} requires the Spin runtime",
            self.builder.method.as_str(),
            self.builder.url
        )))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, GraphqlRequest, GraphqlResponse, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_method_and_url() {
        let req = FetchClient::new().post("https://shop.example.com/graphql/");
        assert_eq!(req.request().url(), "https://shop.example.com/graphql/");
        assert_eq!(req.request().method(), Method::Post);
        assert_eq!(req.request().body_bytes(), None);
    }

    #[test]
    fn test_graphql_request_body() {
        let client = FetchClient::new();
        let op = GraphqlRequest::new("query Q { shop { name } }", "Q", serde_json::json!({}));
        let req = client.graphql("https://shop.example.com/graphql/", &op).unwrap();

        let body: serde_json::Value =
            serde_json::from_slice(req.request().body_bytes().unwrap()).unwrap();
        assert_eq!(body["operationName"], "Q");
        assert_eq!(req.request().header_value("accept"), Some("application/json"));
    }
}
