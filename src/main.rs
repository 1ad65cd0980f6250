// src/main.rs

//! shopcrawl CLI
//!
//! Scrapes configured product listing pages and writes the assembled
//! catalog to a CSV file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopcrawl::{
    error::Result,
    export,
    models::{Config, parse_url_list},
    pipeline,
};

/// shopcrawl - Product Catalog Scraper
#[derive(Parser, Debug)]
#[command(name = "shopcrawl", version, about = "Product catalog scraper")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape all configured listing pages and export the catalog
    Scrape {
        /// Comma-separated listing URLs (overrides configured targets)
        #[arg(long)]
        urls: Option<String>,

        /// Output CSV path (overrides configured export path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Scrape { urls, output } => {
            if let Some(urls) = urls {
                config.targets = parse_url_list(&urls);
            }
            if let Some(path) = output {
                config.export.output_path = path;
            }
            config.validate()?;

            log::info!("Scraping {} listing page(s)...", config.targets.len());
            let outcome = pipeline::run_scraper(&config).await?;
            outcome.log_summary();

            export::export_catalog(&config.export.output_path, &outcome.records)?;
            log::info!(
                "Results saved to {}",
                config.export.output_path.display()
            );
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Config OK");
        }
    }

    Ok(())
}
