//! Print the numbered pager for a listing position.

use anyhow::{bail, Result};
use turbo_catalog::pagination::PageSummary;

use super::PagesArgs;
use crate::context::Context;
use crate::output::format_pager;

pub async fn run(args: PagesArgs, ctx: &Context) -> Result<()> {
    let listing = &ctx.config.listing;
    let per_page = args.per_page.unwrap_or(listing.page_size);
    let max_visible = args.max.unwrap_or(listing.max_visible_pages);
    if per_page == 0 {
        bail!("--per-page must be at least 1");
    }

    let last_page = PageSummary::new(1, per_page, args.total).total_pages;
    let summary = PageSummary::new(args.page.clamp(1, last_page), per_page, args.total);
    if args.page != summary.page {
        ctx.output.warn(&format!(
            "Page {} is out of range, showing page {}",
            args.page, summary.page
        ));
    }
    let slots = summary.visible_pages(max_visible);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": summary,
            "startItem": summary.start_item(),
            "endItem": summary.end_item(),
            "pages": slots,
        }));
        return Ok(());
    }

    ctx.output.info(&format!(
        "Showing {}-{} of {} products",
        summary.start_item(),
        summary.end_item(),
        summary.total
    ));
    if summary.total_pages > 1 {
        ctx.output.plain(&format_pager(&slots, summary.page));
    }
    Ok(())
}
