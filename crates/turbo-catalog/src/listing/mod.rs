//! Product listing orchestration: the state machine, its debounced search
//! box, and the async driver that runs it against the catalog API.

mod api;
mod controller;
mod debounce;
mod driver;

pub use api::{
    CatalogApi, CategoryRef, Money, PriceRange, ProductConnection, ProductEdge, ProductListItem,
    ProductPage, ProductPricing, ProductsQueryVariables, TaxedMoney, Thumbnail,
};
pub use controller::{
    reduce, Command, FetchRequest, ListPhase, ListingController, ListingEvent, ListingState,
    RetryPlan, Transition,
};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use driver::ListingDriver;
