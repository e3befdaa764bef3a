//! Mapping between [`FilterState`] and the listing URL's query string.
//!
//! Decoding is total: anything malformed falls back to "no filter" for that
//! key instead of failing the page.

use super::query_string::QueryString;
use super::state::{
    AttributeFilter, DateRange, FilterState, PriceBounds, PriceSelection, ProductFlags,
    StockAvailability, DEFAULT_SORT,
};
use crate::pagination::Cursor;
use serde::Serialize;

/// Query parameter names.
pub mod params {
    pub const SEARCH: &str = "search";
    pub const CATEGORY: &str = "category";
    pub const COLLECTION: &str = "collection";
    pub const PRODUCT_TYPE: &str = "productType";
    pub const ATTRIBUTE: &str = "attr";
    pub const PRICE_RANGE: &str = "priceRange";
    pub const PRICE_MIN: &str = "priceMin";
    pub const PRICE_MAX: &str = "priceMax";
    pub const STOCK: &str = "stockAvailability";
    pub const SORT_BY: &str = "sortBy";
    pub const AVAILABLE_FROM: &str = "availableFrom";
    pub const PUBLISHED_FROM: &str = "publishedFrom";
    pub const UPDATED_AT_GTE: &str = "updatedAt.gte";
    pub const UPDATED_AT_LTE: &str = "updatedAt.lte";

    pub const CURSOR: &str = "cursor";
    pub const PAGE: &str = "page";
    pub const LOAD_MORE: &str = "loadMore";
}

/// Read the filter state carried by `query`.
pub fn decode(query: &QueryString) -> FilterState {
    let non_empty = |key: &str| query.get(key).filter(|v| !v.is_empty());
    let all = |key: &'static str| {
        query
            .get_all(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    let mut flags = ProductFlags::default();
    for param in ProductFlags::PARAMS {
        if let (Some(value), Some(slot)) = (query.get(param), flags.slot_mut(param)) {
            *slot = Some(value == "true");
        }
    }

    FilterState {
        search: non_empty(params::SEARCH).map(str::to_string),
        categories: all(params::CATEGORY),
        collections: all(params::COLLECTION),
        product_types: all(params::PRODUCT_TYPE),
        attributes: query
            .get_all(params::ATTRIBUTE)
            .filter_map(AttributeFilter::parse)
            .collect(),
        price: decode_price(query),
        stock_availability: query.get(params::STOCK).and_then(StockAvailability::parse),
        sort_by: non_empty(params::SORT_BY)
            .unwrap_or(DEFAULT_SORT)
            .to_string(),
        flags,
        available_from: non_empty(params::AVAILABLE_FROM).map(str::to_string),
        published_from: non_empty(params::PUBLISHED_FROM).map(str::to_string),
        updated_at: DateRange {
            gte: non_empty(params::UPDATED_AT_GTE).map(str::to_string),
            lte: non_empty(params::UPDATED_AT_LTE).map(str::to_string),
        },
    }
}

/// Custom bounds win over a preset when both are in the URL.
fn decode_price(query: &QueryString) -> PriceSelection {
    let min = query.get(params::PRICE_MIN).filter(|v| !v.is_empty());
    let max = query.get(params::PRICE_MAX).filter(|v| !v.is_empty());
    let preset = query.get(params::PRICE_RANGE).filter(|v| !v.is_empty());

    if min.is_some() || max.is_some() {
        if let Some(preset) = preset {
            tracing::warn!(
                price_range = preset,
                price_min = min,
                price_max = max,
                "conflicting price parameters, ignoring priceRange"
            );
        }
        return match PriceBounds::from_parts(min, max) {
            Some(bounds) => PriceSelection::Custom { bounds },
            None => PriceSelection::Any,
        };
    }

    match preset {
        Some(id) => PriceSelection::Preset { id: id.to_string() },
        None => PriceSelection::Any,
    }
}

/// Write `filters` as a fresh query string.
///
/// Navigation keys are never written: changing filters always restarts the
/// listing from its first page.
pub fn encode(filters: &FilterState) -> QueryString {
    let mut query = QueryString::new();

    if let Some(search) = filters.search() {
        query.append(params::SEARCH, search);
    }
    for id in &filters.categories {
        query.append(params::CATEGORY, id.as_str());
    }
    for id in &filters.collections {
        query.append(params::COLLECTION, id.as_str());
    }
    for id in &filters.product_types {
        query.append(params::PRODUCT_TYPE, id.as_str());
    }
    for attribute in &filters.attributes {
        query.append(params::ATTRIBUTE, attribute.to_param());
    }

    match &filters.price {
        PriceSelection::Any => {}
        PriceSelection::Custom { .. } => {
            let bounds = filters.price().unwrap_or_default();
            if let Some(gte) = bounds.gte {
                query.append(params::PRICE_MIN, gte.to_string());
            }
            if let Some(lte) = bounds.lte {
                query.append(params::PRICE_MAX, lte.to_string());
            }
        }
        PriceSelection::Preset { id } => query.append(params::PRICE_RANGE, id.as_str()),
    }

    if let Some(stock) = filters.stock_availability {
        query.append(params::STOCK, stock.as_str());
    }
    if !filters.is_default_sort() {
        query.append(params::SORT_BY, filters.sort_by.as_str());
    }
    for param in ProductFlags::PARAMS {
        if let Some(value) = filters.flags.get(param) {
            query.append(param, value.to_string());
        }
    }
    if let Some(date) = &filters.available_from {
        query.append(params::AVAILABLE_FROM, date.as_str());
    }
    if let Some(date) = &filters.published_from {
        query.append(params::PUBLISHED_FROM, date.as_str());
    }
    if let Some(date) = &filters.updated_at.gte {
        query.append(params::UPDATED_AT_GTE, date.as_str());
    }
    if let Some(date) = &filters.updated_at.lte {
        query.append(params::UPDATED_AT_LTE, date.as_str());
    }

    query
}

/// Where in the listing the URL points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationParams {
    pub cursor: Option<Cursor>,
    /// 1-indexed page number.
    pub page: u32,
    pub load_more: bool,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            cursor: None,
            page: 1,
            load_more: false,
        }
    }
}

pub fn decode_navigation(query: &QueryString) -> NavigationParams {
    NavigationParams {
        cursor: query
            .get(params::CURSOR)
            .filter(|c| !c.is_empty())
            .map(Cursor::from),
        page: query
            .get(params::PAGE)
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1),
        load_more: query.get(params::LOAD_MORE) == Some("true"),
    }
}

/// URL for a numbered page. Filter keys are kept; `loadMore` is dropped.
pub fn paginate(query: &QueryString, page: u32, cursor: Option<&Cursor>) -> QueryString {
    let mut next = query.clone();
    next.remove(params::LOAD_MORE);
    if page > 1 {
        next.set(params::PAGE, page.to_string());
    } else {
        next.remove(params::PAGE);
    }
    match cursor {
        Some(cursor) => next.set(params::CURSOR, cursor.as_str()),
        None => next.remove(params::CURSOR),
    }
    next
}

/// URL for the "load more" continuation from `cursor`.
pub fn load_more_query(query: &QueryString, cursor: &Cursor) -> QueryString {
    let mut next = query.clone();
    next.set(params::CURSOR, cursor.as_str());
    next.set(params::LOAD_MORE, "true");
    next
}
