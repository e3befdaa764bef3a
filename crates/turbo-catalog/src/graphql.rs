//! [`CatalogApi`] over GraphQL.

use crate::config::ListingConfig;
use crate::error::CatalogError;
use crate::listing::{CatalogApi, ProductConnection, ProductPage, ProductsQueryVariables};
use async_trait::async_trait;
use serde::Deserialize;
use turbo_data::{join_errors, ClientRequestBuilder, FetchClient, GraphqlRequest, GraphqlResponse};

pub const PRODUCT_LIST_OPERATION: &str = "ProductListPaginated";

/// Paginated, filtered product list.
pub const PRODUCT_LIST_PAGINATED: &str = r#"query ProductListPaginated(
  $first: Int!
  $after: String
  $channel: String!
  $filter: ProductFilterInput
  $sortBy: ProductOrder
) {
  products(first: $first, after: $after, channel: $channel, filter: $filter, sortBy: $sortBy) {
    totalCount
    edges {
      node {
        id
        name
        slug
        thumbnail(size: 1024, format: WEBP) {
          url
          alt
        }
        category {
          id
          name
        }
        pricing {
          priceRange {
            start { gross { amount currency } }
            stop { gross { amount currency } }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Option<ProductConnection>,
}

/// Catalog client for a GraphQL commerce endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlCatalog {
    client: FetchClient,
    endpoint: String,
    token: Option<String>,
}

impl GraphqlCatalog {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: FetchClient::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Build from configuration. Fails when no `api_url` is set.
    pub fn from_config(config: &ListingConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        let endpoint = config
            .api_url
            .as_deref()
            .ok_or_else(|| CatalogError::Config("api_url is not set".into()))?;
        Ok(Self::new(endpoint))
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(
        &self,
        variables: &ProductsQueryVariables,
    ) -> Result<ClientRequestBuilder, CatalogError> {
        let operation =
            GraphqlRequest::new(PRODUCT_LIST_PAGINATED, PRODUCT_LIST_OPERATION, variables);
        let mut request = self.client.graphql(self.endpoint.as_str(), &operation)?;
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    /// Unwrap a `{data, errors}` body into a page.
    pub fn parse_response(body: &[u8]) -> Result<ProductPage, CatalogError> {
        let envelope: GraphqlResponse<ProductsData> = serde_json::from_slice(body)?;
        let data = envelope
            .into_result()
            .map_err(|errors| CatalogError::Api(join_errors(&errors)))?;

        data.and_then(|d| d.products)
            .map(ProductConnection::into_page)
            .ok_or_else(|| CatalogError::MissingData("products".into()))
    }
}

#[async_trait]
impl CatalogApi for GraphqlCatalog {
    async fn fetch_products(
        &self,
        variables: &ProductsQueryVariables,
    ) -> Result<ProductPage, CatalogError> {
        let response = self.build_request(variables)?.send().await?;
        let response = response.error_for_status().map_err(|e| {
            tracing::debug!(endpoint = %self.endpoint, status = ?e.status(), "catalog request rejected");
            e
        })?;
        Self::parse_response(&response.body)
    }
}
