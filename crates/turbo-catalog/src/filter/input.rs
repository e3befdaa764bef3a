//! Translation of [`FilterState`] into the upstream `ProductFilterInput`
//! and `ProductOrder` shapes.

use super::state::{AttributeFilter, DateRange, FilterState, PriceBounds, ProductFlags, StockAvailability};
use serde::{Deserialize, Serialize};

/// Sortable product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductOrderField {
    Name,
    Price,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// `{field, direction}` as sent in `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInput {
    pub field: ProductOrderField,
    pub direction: OrderDirection,
}

impl SortInput {
    pub const fn new(field: ProductOrderField, direction: OrderDirection) -> Self {
        Self { field, direction }
    }

    /// Map a URL sort key onto the upstream ordering.
    ///
    /// | key          | field | direction |
    /// |--------------|-------|-----------|
    /// | `NAME`       | NAME  | ASC       |
    /// | `NAME_DESC`  | NAME  | DESC      |
    /// | `PRICE`      | PRICE | ASC       |
    /// | `PRICE_DESC` | PRICE | DESC      |
    /// | `DATE`       | DATE  | DESC      |
    /// | `DATE_ASC`   | DATE  | ASC       |
    ///
    /// A leading `-` on a base key (`-PRICE`) sorts that field descending.
    /// Anything else sorts by name, ascending.
    pub fn from_sort_key(key: &str) -> Self {
        use OrderDirection::{Asc, Desc};
        use ProductOrderField::{Date, Name, Price};

        if let Some(base) = key.strip_prefix('-') {
            return match base {
                "NAME" => Self::new(Name, Desc),
                "PRICE" => Self::new(Price, Desc),
                "DATE" => Self::new(Date, Desc),
                _ => Self::default(),
            };
        }

        match key {
            "NAME" => Self::new(Name, Asc),
            "NAME_DESC" => Self::new(Name, Desc),
            "PRICE" => Self::new(Price, Asc),
            "PRICE_DESC" => Self::new(Price, Desc),
            "DATE" => Self::new(Date, Desc),
            "DATE_ASC" => Self::new(Date, Asc),
            _ => Self::default(),
        }
    }
}

impl Default for SortInput {
    fn default() -> Self {
        Self::new(ProductOrderField::Name, OrderDirection::Asc)
    }
}

/// Upstream product filter. Only present criteria are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilterInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_availability: Option<StockAvailability>,
    #[serde(flatten)]
    pub flags: ProductFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateRange>,
}

impl ProductFilterInput {
    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            search: filters.search().map(str::to_string),
            categories: non_empty(&filters.categories),
            collections: non_empty(&filters.collections),
            product_types: non_empty(&filters.product_types),
            price: filters.price(),
            attributes: non_empty(&filters.attributes),
            stock_availability: filters.stock_availability,
            flags: filters.flags,
            available_from: filters.available_from.clone(),
            published_from: filters.published_from.clone(),
            updated_at: (!filters.updated_at.is_empty()).then(|| filters.updated_at.clone()),
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    (!items.is_empty()).then(|| items.to_vec())
}
