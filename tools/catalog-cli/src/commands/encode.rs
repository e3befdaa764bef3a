//! Build a listing URL from filters.

use std::io::Read;

use anyhow::{bail, Context as _, Result};
use turbo_catalog::filter::{self, FilterState, PriceBounds, StockAvailability};

use super::EncodeArgs;
use crate::context::Context;

pub async fn run(args: EncodeArgs, ctx: &Context) -> Result<()> {
    let filters = match &args.from_json {
        Some(source) => read_filters(source)?,
        None => filters_from_args(&args)?,
    };
    let query = filter::encode(&filters).to_string();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "query": query,
            "activeFilters": filters.active_filter_count(),
        }));
    } else {
        ctx.output.plain(&query);
    }
    Ok(())
}

fn read_filters(source: &str) -> Result<FilterState> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read filters from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read filters from {}", source))?
    };
    serde_json::from_str(&content).context("Invalid filter state JSON")
}

fn filters_from_args(args: &EncodeArgs) -> Result<FilterState> {
    let mut filters = FilterState::new();

    if let Some(search) = &args.search {
        filters.set_search(search.as_str());
    }
    for id in &args.categories {
        if !filters.categories.contains(id) {
            filters.categories.push(id.clone());
        }
    }

    if let Some(preset) = &args.price_range {
        if PriceBounds::parse_range(preset).is_none() {
            bail!("Invalid price range: {}", preset);
        }
        filters.set_price_range(preset.as_str());
    } else if args.price_min.is_some() || args.price_max.is_some() {
        let bounds = PriceBounds::new(args.price_min, args.price_max);
        if bounds.gte.zip(bounds.lte).is_some_and(|(min, max)| min > max) {
            bail!("--price-min must not exceed --price-max");
        }
        filters.set_price(bounds);
    }

    if let Some(stock) = &args.stock {
        let Some(stock) = StockAvailability::parse(&stock.to_ascii_uppercase()) else {
            bail!("Unknown stock availability: {} (expected IN_STOCK or OUT_OF_STOCK)", stock);
        };
        filters = filters.with_stock(stock);
    }
    if let Some(sort) = &args.sort {
        filters = filters.with_sort(sort.as_str());
    }

    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(args: EncodeArgs) -> String {
        filter::encode(&filters_from_args(&args).unwrap()).to_string()
    }

    #[test]
    fn test_encode_from_flags() {
        let query = encode(EncodeArgs {
            search: Some("running shoes".into()),
            categories: vec!["a".into(), "b".into()],
            price_range: Some("100-500".into()),
            stock: Some("in_stock".into()),
            sort: Some("PRICE_DESC".into()),
            ..Default::default()
        });
        assert_eq!(
            query,
            "search=running+shoes&category=a&category=b&priceRange=100-500&stockAvailability=IN_STOCK&sortBy=PRICE_DESC"
        );
    }

    #[test]
    fn test_custom_bounds() {
        let query = encode(EncodeArgs {
            price_min: Some(20.0),
            ..Default::default()
        });
        assert_eq!(query, "priceMin=20");

        let query = encode(EncodeArgs {
            price_min: Some(0.0),
            price_max: Some(50.0),
            ..Default::default()
        });
        assert_eq!(query, "priceMax=50");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(filters_from_args(&EncodeArgs {
            price_min: Some(50.0),
            price_max: Some(10.0),
            ..Default::default()
        })
        .is_err());
        assert!(filters_from_args(&EncodeArgs {
            stock: Some("sometimes".into()),
            ..Default::default()
        })
        .is_err());
        assert!(filters_from_args(&EncodeArgs {
            price_range: Some("cheap".into()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_partial_json_filters() {
        let filters: FilterState =
            serde_json::from_str(r#"{"search": "boots", "categories": ["c1"]}"#).unwrap();
        assert_eq!(filter::encode(&filters).to_string(), "search=boots&category=c1");
    }
}
