//! Catalog filter state.

use serde::{Deserialize, Serialize};

/// Sort key used when the URL carries none.
pub const DEFAULT_SORT: &str = "NAME";

/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockAvailability {
    InStock,
    OutOfStock,
}

impl StockAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAvailability::InStock => "IN_STOCK",
            StockAvailability::OutOfStock => "OUT_OF_STOCK",
        }
    }

    /// Parse the wire form. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "IN_STOCK" => Some(StockAvailability::InStock),
            "OUT_OF_STOCK" => Some(StockAvailability::OutOfStock),
            _ => None,
        }
    }
}

/// Inclusive price bounds. A missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

impl PriceBounds {
    pub fn new(gte: Option<f64>, lte: Option<f64>) -> Self {
        Self { gte, lte }
    }

    pub fn is_unbounded(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }

    /// Parse a preset bucket such as `"100-500"`, `"under-100"` or `"over-1000"`.
    ///
    /// Each half that is not a positive finite number is unbounded. Returns
    /// `None` when neither half parses.
    pub fn parse_range(preset: &str) -> Option<Self> {
        let mut halves = preset.split('-');
        let gte = halves.next().and_then(parse_bound);
        let lte = halves.next().and_then(parse_bound);
        Self::new(gte, lte).bounded()
    }

    /// Build bounds from separate `priceMin` / `priceMax` inputs.
    pub fn from_parts(min: Option<&str>, max: Option<&str>) -> Option<Self> {
        Self::new(min.and_then(parse_bound), max.and_then(parse_bound)).bounded()
    }

    /// Drop sides that are not a usable bound. `None` when nothing is left.
    fn bounded(self) -> Option<Self> {
        let bounds = Self::new(self.gte.and_then(usable), self.lte.and_then(usable));
        (!bounds.is_unbounded()).then_some(bounds)
    }
}

/// Zero counts as unbounded, matching how the storefront treats a `0` bound.
fn usable(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse().ok().and_then(usable)
}

/// The active price filter.
///
/// Custom bounds and a preset bucket are mutually exclusive: selecting one
/// replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceSelection {
    #[default]
    Any,
    /// Bounds typed into the min/max inputs.
    Custom { bounds: PriceBounds },
    /// A preset bucket identifier.
    Preset { id: String },
}

impl PriceSelection {
    /// Effective bounds, whichever way they were selected.
    pub fn bounds(&self) -> Option<PriceBounds> {
        match self {
            PriceSelection::Any => None,
            PriceSelection::Custom { bounds } => bounds.bounded(),
            PriceSelection::Preset { id } => PriceBounds::parse_range(id),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, PriceSelection::Any)
    }
}

/// Attribute filter encoded in the URL as `slug:value1:value2`.
///
/// `:` is the separator, so neither the slug nor a value may contain one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub slug: String,
    pub values: Vec<String>,
}

impl AttributeFilter {
    /// `None` for an empty slug or when any part contains `:`.
    pub fn new(slug: impl Into<String>, values: Vec<String>) -> Option<Self> {
        let slug = slug.into();
        if slug.is_empty() || slug.contains(':') || values.iter().any(|v| v.contains(':')) {
            return None;
        }
        Some(Self { slug, values })
    }

    /// Parse the `slug:value...` form. An empty slug is rejected.
    pub fn parse(param: &str) -> Option<Self> {
        let mut parts = param.split(':');
        let slug = parts.next().filter(|s| !s.is_empty())?;
        Some(Self {
            slug: slug.to_string(),
            values: parts.map(str::to_string).collect(),
        })
    }

    pub fn to_param(&self) -> String {
        std::iter::once(self.slug.as_str())
            .chain(self.values.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Boolean product flags. `None` means the flag is not filtered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFlags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible_in_listing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_card: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_category: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_preordered_variants: Option<bool>,
}

impl ProductFlags {
    /// Query parameter names, one per flag.
    pub const PARAMS: [&'static str; 6] = [
        "isPublished",
        "isAvailable",
        "isVisibleInListing",
        "giftCard",
        "hasCategory",
        "hasPreorderedVariants",
    ];

    pub fn get(&self, param: &str) -> Option<bool> {
        match param {
            "isPublished" => self.is_published,
            "isAvailable" => self.is_available,
            "isVisibleInListing" => self.is_visible_in_listing,
            "giftCard" => self.gift_card,
            "hasCategory" => self.has_category,
            "hasPreorderedVariants" => self.has_preordered_variants,
            _ => None,
        }
    }

    /// Mutable slot for a flag by its parameter name.
    pub fn slot_mut(&mut self, param: &str) -> Option<&mut Option<bool>> {
        match param {
            "isPublished" => Some(&mut self.is_published),
            "isAvailable" => Some(&mut self.is_available),
            "isVisibleInListing" => Some(&mut self.is_visible_in_listing),
            "giftCard" => Some(&mut self.gift_card),
            "hasCategory" => Some(&mut self.has_category),
            "hasPreorderedVariants" => Some(&mut self.has_preordered_variants),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Inclusive date range with opaque ISO-8601 endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }
}

/// The user's current catalog query intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text query.
    pub search: Option<String>,
    /// Category ids, OR'd.
    pub categories: Vec<String>,
    pub collections: Vec<String>,
    pub product_types: Vec<String>,
    pub attributes: Vec<AttributeFilter>,
    pub price: PriceSelection,
    pub stock_availability: Option<StockAvailability>,
    /// Sort key; a leading `-` means descending.
    pub sort_by: String,
    pub flags: ProductFlags,
    pub available_from: Option<String>,
    pub published_from: Option<String>,
    pub updated_at: DateRange,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: None,
            categories: Vec::new(),
            collections: Vec::new(),
            product_types: Vec::new(),
            attributes: Vec::new(),
            price: PriceSelection::Any,
            stock_availability: None,
            sort_by: DEFAULT_SORT.to_string(),
            flags: ProductFlags::default(),
            available_from: None,
            published_from: None,
            updated_at: DateRange::default(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text, treating an empty string as absent.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.search = (!search.is_empty()).then_some(search);
    }

    /// Select custom bounds, clearing any preset.
    ///
    /// Zero, negative and non-finite sides are unbounded, as in the URL form.
    pub fn set_price(&mut self, bounds: PriceBounds) {
        self.price = match bounds.bounded() {
            Some(bounds) => PriceSelection::Custom { bounds },
            None => PriceSelection::Any,
        };
    }

    /// Select a preset bucket, clearing any custom bounds.
    pub fn set_price_range(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.price = if id.is_empty() {
            PriceSelection::Any
        } else {
            PriceSelection::Preset { id }
        };
    }

    pub fn clear_price(&mut self) {
        self.price = PriceSelection::Any;
    }

    /// Effective price bounds.
    pub fn price(&self) -> Option<PriceBounds> {
        self.price.bounds()
    }

    /// The selected preset id, if a preset is active.
    pub fn price_range(&self) -> Option<&str> {
        match &self.price {
            PriceSelection::Preset { id } => Some(id),
            _ => None,
        }
    }

    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, id: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == id) {
            self.categories.remove(pos);
        } else {
            self.categories.push(id.to_string());
        }
    }

    pub fn is_default_sort(&self) -> bool {
        self.sort_by.is_empty() || self.sort_by == DEFAULT_SORT
    }

    /// Number of active filters as shown on the filter toggle badge:
    /// one per category, plus one each for a price selection and search.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len()
            + usize::from(!self.price.is_any())
            + usize::from(self.search().is_some())
    }

    /// A fresh state with every filter cleared.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_category(mut self, id: impl Into<String>) -> Self {
        self.categories.push(id.into());
        self
    }

    pub fn with_price(mut self, bounds: PriceBounds) -> Self {
        self.set_price(bounds);
        self
    }

    pub fn with_price_range(mut self, id: impl Into<String>) -> Self {
        self.set_price_range(id);
        self
    }

    pub fn with_stock(mut self, stock: StockAvailability) -> Self {
        self.stock_availability = Some(stock);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_both_bounds() {
        let bounds = PriceBounds::parse_range("100-500").unwrap();
        assert_eq!(bounds, PriceBounds::new(Some(100.0), Some(500.0)));
    }

    #[test]
    fn test_parse_range_partial() {
        assert_eq!(
            PriceBounds::parse_range("100-abc"),
            Some(PriceBounds::new(Some(100.0), None))
        );
        assert_eq!(
            PriceBounds::parse_range("under-100"),
            Some(PriceBounds::new(None, Some(100.0)))
        );
        assert_eq!(
            PriceBounds::parse_range("over-1000"),
            Some(PriceBounds::new(Some(1000.0), None))
        );
    }

    #[test]
    fn test_parse_range_ignores_extra_parts() {
        assert_eq!(
            PriceBounds::parse_range("100-500-900"),
            Some(PriceBounds::new(Some(100.0), Some(500.0)))
        );
        assert_eq!(
            PriceBounds::parse_range("-200"),
            Some(PriceBounds::new(None, Some(200.0)))
        );
    }

    #[test]
    fn test_parse_range_nothing_parses() {
        assert_eq!(PriceBounds::parse_range("cheap-expensive"), None);
        assert_eq!(PriceBounds::parse_range(""), None);
        assert_eq!(PriceBounds::parse_range("0-0"), None);
        assert_eq!(PriceBounds::parse_range("inf-NaN"), None);
    }

    #[test]
    fn test_setting_price_clears_preset() {
        let mut state = FilterState::new().with_price_range("100-500");
        state.set_price(PriceBounds::new(Some(20.0), None));
        assert_eq!(state.price_range(), None);
        assert_eq!(state.price(), Some(PriceBounds::new(Some(20.0), None)));
    }

    #[test]
    fn test_setting_preset_clears_price() {
        let mut state = FilterState::new().with_price(PriceBounds::new(Some(20.0), Some(40.0)));
        state.set_price_range("500-1000");
        assert_eq!(state.price_range(), Some("500-1000"));
        assert_eq!(state.price(), Some(PriceBounds::new(Some(500.0), Some(1000.0))));
        assert!(matches!(state.price, PriceSelection::Preset { .. }));
    }

    #[test]
    fn test_set_price_drops_unusable_sides() {
        let state = FilterState::new().with_price(PriceBounds::new(Some(0.0), Some(50.0)));
        assert_eq!(
            state.price,
            PriceSelection::Custom {
                bounds: PriceBounds::new(None, Some(50.0))
            }
        );

        let state = FilterState::new().with_price(PriceBounds::new(Some(-5.0), Some(f64::NAN)));
        assert!(state.price.is_any());
        let state = FilterState::new().with_price(PriceBounds::new(Some(0.0), None));
        assert!(state.price.is_any());
    }

    #[test]
    fn test_unbounded_price_is_no_filter() {
        let state = FilterState::new().with_price(PriceBounds::default());
        assert!(state.price.is_any());
    }

    #[test]
    fn test_toggle_category() {
        let mut state = FilterState::new().with_category("shoes");
        state.toggle_category("bags");
        assert_eq!(state.categories, vec!["shoes", "bags"]);
        state.toggle_category("shoes");
        assert_eq!(state.categories, vec!["bags"]);
    }

    #[test]
    fn test_active_filter_count() {
        let state = FilterState::new()
            .with_search("jacket")
            .with_category("a")
            .with_category("b")
            .with_price_range("100-500")
            .with_sort("PRICE_DESC");
        assert_eq!(state.active_filter_count(), 4);
        assert_eq!(state.cleared().active_filter_count(), 0);
        assert_eq!(state.cleared().sort_by, DEFAULT_SORT);
    }

    #[test]
    fn test_empty_search_is_absent() {
        let state = FilterState::new().with_search("");
        assert_eq!(state.search, None);
        let raw = FilterState {
            search: Some(String::new()),
            ..FilterState::default()
        };
        assert_eq!(raw.search(), None);
    }

    #[test]
    fn test_attribute_param() {
        let attr = AttributeFilter::parse("color:red:blue").unwrap();
        assert_eq!(attr.slug, "color");
        assert_eq!(attr.values, vec!["red", "blue"]);
        assert_eq!(attr.to_param(), "color:red:blue");
        assert!(AttributeFilter::parse(":red").is_none());
    }

    #[test]
    fn test_attribute_rejects_separator() {
        assert!(AttributeFilter::new("size", vec!["10:11".into()]).is_none());
        assert!(AttributeFilter::new("si:ze", vec!["10".into()]).is_none());
        assert!(AttributeFilter::new("", vec!["10".into()]).is_none());

        let attr = AttributeFilter::new("size", vec!["10".into(), "11".into()]).unwrap();
        assert_eq!(AttributeFilter::parse(&attr.to_param()), Some(attr));
    }

    #[test]
    fn test_flag_slots() {
        let mut flags = ProductFlags::default();
        for param in ProductFlags::PARAMS {
            *flags.slot_mut(param).unwrap() = Some(true);
            assert_eq!(flags.get(param), Some(true));
        }
        assert!(flags.slot_mut("isDeleted").is_none());
        assert!(!flags.is_empty());
    }

    #[test]
    fn test_stock_availability_parse() {
        assert_eq!(StockAvailability::parse("IN_STOCK"), Some(StockAvailability::InStock));
        assert_eq!(StockAvailability::parse("in_stock"), None);
        assert_eq!(StockAvailability::OutOfStock.as_str(), "OUT_OF_STOCK");
    }
}
