//! Catalog listing state for TurboCommerce storefronts.
//!
//! The reusable core of a filtered, cursor-paginated product listing:
//!
//! - **Filter**: the filter state model, its URL query-string form and its
//!   translation into the upstream `ProductFilterInput`
//! - **Pagination**: forward cursor tracking and the numbered pager
//! - **Listing**: a pure reducer, a controller with debounced search, and an
//!   async driver with last-write-wins fetch ordering
//! - **GraphQL**: the [`CatalogApi`](listing::CatalogApi) adapter
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_catalog::prelude::*;
//!
//! let config = ListingConfig::default().with_api_url("https://shop.example.com/graphql/");
//! let api = GraphqlCatalog::from_config(&config)?;
//!
//! let mut listing = ListingDriver::new(api, &config);
//! listing.mount(QueryString::parse("?category=shoes&priceRange=100-500")).await;
//!
//! listing.dispatch(ListingEvent::LoadMore).await;
//! println!("{} of {}", listing.state().items.len(), listing.state().pagination().total_count);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod graphql;
pub mod listing;
pub mod pagination;

pub use config::ListingConfig;
pub use error::CatalogError;
pub use graphql::GraphqlCatalog;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ListingConfig;
    pub use crate::error::CatalogError;
    pub use crate::graphql::GraphqlCatalog;

    // Filter
    pub use crate::filter::{
        FilterState, PriceBounds, PriceSelection, ProductFilterInput, QueryString, SortInput,
        StockAvailability,
    };

    // Pagination
    pub use crate::pagination::{Cursor, PageInfo, PageSlot, PageSummary, PaginationState};

    // Listing
    pub use crate::listing::{
        CatalogApi, Command, ListPhase, ListingController, ListingDriver, ListingEvent,
        ListingState, ProductListItem, ProductPage, ProductsQueryVariables,
    };
}
