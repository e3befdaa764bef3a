//! Decode a listing URL into filter state.

use anyhow::Result;
use serde::Serialize;
use turbo_catalog::filter::{self, FilterState, NavigationParams, PriceSelection, QueryString};

use super::DecodeArgs;
use crate::context::Context;
use crate::output::or_dash;

#[derive(Serialize)]
struct Decoded {
    filters: FilterState,
    navigation: NavigationParams,
    canonical: String,
}

pub async fn run(args: DecodeArgs, ctx: &Context) -> Result<()> {
    let decoded = decode(&args.query);

    if ctx.output.is_json() {
        ctx.output.json(&decoded);
        return Ok(());
    }

    let filters = &decoded.filters;
    ctx.output.header("Filters");
    ctx.output.kv("search", &or_dash(filters.search()));
    ctx.output.kv("categories", &join(&filters.categories));
    ctx.output.kv("collections", &join(&filters.collections));
    ctx.output.kv("product types", &join(&filters.product_types));
    for attribute in &filters.attributes {
        ctx.output.list_item(&attribute.to_param());
    }
    ctx.output.kv("price", &describe_price(&filters.price));
    ctx.output.kv(
        "stock",
        &or_dash(filters.stock_availability.map(|s| s.as_str())),
    );
    ctx.output.kv("sort", &filters.sort_by);
    ctx.output
        .kv("active filters", &filters.active_filter_count().to_string());

    ctx.output.header("Navigation");
    let nav = &decoded.navigation;
    ctx.output.kv("page", &nav.page.to_string());
    ctx.output.kv("cursor", &or_dash(nav.cursor.as_ref().map(|c| c.as_str())));
    ctx.output.kv("load more", &nav.load_more.to_string());

    ctx.output.header("Canonical");
    ctx.output.plain(&decoded.canonical);

    Ok(())
}

fn decode(raw: &str) -> Decoded {
    let query = QueryString::parse(raw);
    let filters = filter::decode(&query);
    tracing::debug!(params = query.len(), "decoded listing query");
    Decoded {
        canonical: filter::encode(&filters).to_string(),
        navigation: filter::decode_navigation(&query),
        filters,
    }
}

fn join(values: &[String]) -> String {
    if values.is_empty() {
        or_dash(None)
    } else {
        values.join(", ")
    }
}

fn describe_price(price: &PriceSelection) -> String {
    let bounds = price.bounds().unwrap_or_default();
    let side = |v: Option<f64>| v.map_or_else(|| "*".to_string(), |v| v.to_string());
    match price {
        PriceSelection::Any => or_dash(None),
        PriceSelection::Preset { id } => {
            format!("{id} ({}..{})", side(bounds.gte), side(bounds.lte))
        }
        PriceSelection::Custom { .. } => format!("{}..{}", side(bounds.gte), side(bounds.lte)),
    }
}
