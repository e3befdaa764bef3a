//! Catalog CLI - inspect listing URLs, filter translation and configuration.
//!
//! Commands:
//! - `catalog decode` - Decode a listing query string into filter state
//! - `catalog encode` - Build a listing query string from filters
//! - `catalog translate` - Show the upstream query variables for a URL
//! - `catalog pages` - Print the numbered pager for a position
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, DecodeArgs, EncodeArgs, PagesArgs, TranslateArgs};
use logging::{LogConfig, LogFormat};

/// Catalog CLI - Inspect storefront listing URLs and queries
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Log format override (pretty, compact, json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a listing query string
    Decode(DecodeArgs),

    /// Encode filters as a listing query string
    Encode(EncodeArgs),

    /// Show the catalog query variables for a listing query string
    Translate(TranslateArgs),

    /// Print the page window for a listing position
    Pages(PagesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format.unwrap_or(ctx.config.log.format))
        .with_ansi(!cli.json);
    logging::init_logging(&log_config)?;
    match &ctx.config_path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    let result = match cli.command {
        Commands::Decode(args) => commands::decode::run(args, &ctx).await,
        Commands::Encode(args) => commands::encode::run(args, &ctx).await,
        Commands::Translate(args) => commands::translate::run(args, &ctx).await,
        Commands::Pages(args) => commands::pages::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
