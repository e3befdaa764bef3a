//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;
use crate::output::or_dash;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { api_url, force } => init_config(api_url.as_deref(), force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", &or_dash(None)),
    }

    let listing = &ctx.config.listing;
    ctx.output.info("[listing]");
    ctx.output.kv("api_url", &or_dash(listing.api_url.as_deref()));
    ctx.output.kv("channel", &listing.channel);
    ctx.output.kv("page_size", &listing.page_size.to_string());
    ctx.output
        .kv("search_debounce_ms", &listing.search_debounce_ms.to_string());
    ctx.output
        .kv("fetch_timeout_ms", &listing.fetch_timeout_ms.to_string());
    ctx.output
        .kv("max_visible_pages", &listing.max_visible_pages.to_string());

    ctx.output.info("[log]");
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());

    Ok(())
}

async fn init_config(api_url: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config(api_url))?;
    tracing::info!(path = %path.display(), "wrote default config");
    ctx.output
        .success(&format!("Created {}", path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    let listing = &ctx.config.listing;
    listing.validate()?;

    if listing.api_url.is_none() {
        ctx.output
            .warn("api_url is not set; only offline commands will work");
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": true }));
    } else {
        ctx.output.success("Configuration is valid");
    }
    Ok(())
}
