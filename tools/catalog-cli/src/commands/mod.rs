//! CLI command implementations.

pub mod config;
pub mod decode;
pub mod encode;
pub mod pages;
pub mod translate;

use clap::{Args, Subcommand};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// Query string, with or without the leading `?`.
    pub query: String,
}

/// Arguments for the encode command.
#[derive(Args, Default)]
pub struct EncodeArgs {
    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category id (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Preset price bucket, e.g. `100-500`.
    #[arg(long, conflicts_with_all = ["price_min", "price_max"])]
    pub price_range: Option<String>,

    /// Lower price bound.
    #[arg(long)]
    pub price_min: Option<f64>,

    /// Upper price bound.
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Stock availability (IN_STOCK or OUT_OF_STOCK).
    #[arg(long)]
    pub stock: Option<String>,

    /// Sort key, e.g. `PRICE_DESC` or `-NAME`.
    #[arg(long)]
    pub sort: Option<String>,

    /// Read the filter state from a JSON file (`-` for stdin).
    #[arg(long, conflicts_with_all = ["search", "categories", "price_range", "price_min", "price_max", "stock", "sort"])]
    pub from_json: Option<String>,
}

/// Arguments for the translate command.
#[derive(Args)]
pub struct TranslateArgs {
    /// Listing query string.
    #[arg(default_value = "")]
    pub query: String,

    /// Continue after this cursor instead of the one in the URL.
    #[arg(long)]
    pub cursor: Option<String>,

    /// Page size (defaults to the configured one).
    #[arg(long)]
    pub first: Option<u32>,

    /// Show the full GraphQL request instead of just the variables.
    #[arg(long)]
    pub request: bool,
}

/// Arguments for the pages command.
#[derive(Args)]
pub struct PagesArgs {
    /// Current page (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Total number of items.
    #[arg(short, long)]
    pub total: u64,

    /// Items per page (defaults to the configured page size).
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Most page links to show (defaults to the configured value).
    #[arg(long)]
    pub max: Option<usize>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a default catalog.toml
    Init {
        /// GraphQL endpoint to put in the file
        #[arg(long)]
        api_url: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}
