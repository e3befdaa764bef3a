//! Filter state and its two serialized forms: the listing URL and the
//! upstream filter input.

pub mod codec;
mod input;
mod query_string;
mod state;

pub use codec::{decode, decode_navigation, encode, load_more_query, paginate, NavigationParams};
pub use input::{OrderDirection, ProductFilterInput, ProductOrderField, SortInput};
pub use query_string::QueryString;
pub use state::{
    AttributeFilter, DateRange, FilterState, PriceBounds, PriceSelection, ProductFlags,
    StockAvailability, DEFAULT_SORT,
};
