//! Show the catalog query a listing URL turns into.

use anyhow::{Context as _, Result};
use turbo_catalog::filter::{self, QueryString};
use turbo_catalog::listing::ProductsQueryVariables;
use turbo_catalog::pagination::Cursor;
use turbo_catalog::{GraphqlCatalog, ListingConfig};

use super::TranslateArgs;
use crate::context::Context;

pub async fn run(args: TranslateArgs, ctx: &Context) -> Result<()> {
    let variables = translate(&args, &ctx.config.listing);

    if !args.request {
        ctx.output.json(&variables);
        return Ok(());
    }

    let catalog = GraphqlCatalog::from_config(&ctx.config.listing)
        .context("--request needs a valid listing config")?;
    let request = catalog.build_request(&variables)?;
    let request = request.request();
    let body: serde_json::Value = match request.body_bytes() {
        Some(bytes) => serde_json::from_slice(bytes)?,
        None => serde_json::Value::Null,
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "method": request.method().as_str(),
            "url": request.url(),
            "body": body,
        }));
    } else {
        ctx.output.header("Request");
        ctx.output.kv("method", request.method().as_str());
        ctx.output.kv("url", request.url());
        ctx.output.header("Body");
        ctx.output.json(&body);
    }
    Ok(())
}

/// Page size comes from `--first` capped at the configured maximum.
fn translate(args: &TranslateArgs, config: &ListingConfig) -> ProductsQueryVariables {
    let query = QueryString::parse(&args.query);
    let filters = filter::decode(&query);
    let after = args
        .cursor
        .as_deref()
        .map(Cursor::from)
        .or_else(|| filter::decode_navigation(&query).cursor);
    let first = args
        .first
        .unwrap_or(config.page_size)
        .clamp(1, turbo_catalog::config::MAX_PAGE_SIZE);

    tracing::debug!(first, has_cursor = after.is_some(), "translating listing query");
    ProductsQueryVariables::new(config.channel.as_str(), first, after, &filters)
}
