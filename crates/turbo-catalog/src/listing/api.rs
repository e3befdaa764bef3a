//! The upstream catalog API seam and its wire types.

use crate::error::CatalogError;
use crate::filter::{FilterState, ProductFilterInput, SortInput};
use crate::pagination::{Cursor, PageInfo};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source of product pages.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_products(
        &self,
        variables: &ProductsQueryVariables,
    ) -> Result<ProductPage, CatalogError>;
}

/// Variables of the paginated product list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQueryVariables {
    pub first: u32,
    /// Serialized as `null` for the first page.
    pub after: Option<Cursor>,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ProductFilterInput>,
    pub sort_by: SortInput,
}

impl ProductsQueryVariables {
    pub fn new(
        channel: impl Into<String>,
        first: u32,
        after: Option<Cursor>,
        filters: &FilterState,
    ) -> Self {
        let filter = ProductFilterInput::from_filters(filters);
        Self {
            first,
            after,
            channel: channel.into(),
            filter: (!filter.is_empty()).then_some(filter),
            sort_by: SortInput::from_sort_key(&filters.sort_by),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxedMoney {
    pub gross: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub start: Option<TaxedMoney>,
    pub stop: Option<TaxedMoney>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// A product as shown in the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub pricing: Option<ProductPricing>,
}

impl ProductListItem {
    /// Gross starting price, if the product is priced in this channel.
    pub fn start_price(&self) -> Option<&Money> {
        self.pricing
            .as_ref()?
            .price_range
            .as_ref()?
            .start
            .as_ref()
            .map(|p| &p.gross)
    }
}

/// One page of results, already unwrapped from the connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductListItem>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductEdge {
    pub node: ProductListItem,
}

/// The `products` connection as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
    /// Absent or null counts as zero.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl ProductConnection {
    pub fn into_page(self) -> ProductPage {
        ProductPage {
            items: self.edges.into_iter().map(|edge| edge.node).collect(),
            page_info: self.page_info,
            total_count: self.total_count.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{PriceBounds, StockAvailability};
    use serde_json::json;

    #[test]
    fn test_variables_for_default_filters() {
        let vars = ProductsQueryVariables::new("default-channel", 12, None, &FilterState::default());
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({
                "first": 12,
                "after": null,
                "channel": "default-channel",
                "sortBy": {"field": "NAME", "direction": "ASC"}
            })
        );
    }

    #[test]
    fn test_variables_carry_filter_and_cursor() {
        let filters = FilterState::new()
            .with_price(PriceBounds::new(None, Some(50.0)))
            .with_stock(StockAvailability::OutOfStock)
            .with_sort("PRICE_DESC");
        let vars = ProductsQueryVariables::new("eu", 24, Some(Cursor::new("abc")), &filters);
        let value = serde_json::to_value(&vars).unwrap();

        assert_eq!(value["after"], "abc");
        assert_eq!(value["filter"], json!({"price": {"lte": 50.0}, "stockAvailability": "OUT_OF_STOCK"}));
        assert_eq!(value["sortBy"], json!({"field": "PRICE", "direction": "DESC"}));
    }

    #[test]
    fn test_connection_into_page() {
        let connection: ProductConnection = serde_json::from_value(json!({
            "edges": [
                {"node": {
                    "id": "UHJvZHVjdDox",
                    "name": "Runner",
                    "slug": "runner",
                    "thumbnail": {"url": "https://cdn.example.com/r.png", "alt": null},
                    "category": {"id": "Q2F0OjE=", "name": "Shoes"},
                    "pricing": {"priceRange": {
                        "start": {"gross": {"amount": 59.0, "currency": "USD"}},
                        "stop": null
                    }}
                }},
                {"node": {"id": "UHJvZHVjdDoy", "name": "Walker", "slug": "walker"}}
            ],
            "pageInfo": {"hasNextPage": true, "endCursor": "WyJ3YWxrZXIiXQ=="},
            "totalCount": null
        }))
        .unwrap();

        let page = connection.into_page();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].start_price().map(|m| m.amount), Some(59.0));
        assert_eq!(page.items[1].start_price(), None);
        assert_eq!(page.page_info.end_cursor, Some(Cursor::new("WyJ3YWxrZXIiXQ==")));
        assert_eq!(page.total_count, 0);
    }
}
