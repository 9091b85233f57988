// src/bin/cli.rs

//! Catalog Crawler CLI
//!
//! Walks the listing pages, scrapes every product and publishes the records.

use std::future;
use std::path::PathBuf;

use catalog_crawler::{
    error::Result,
    models::{Config, RendererKind},
    pipeline::{self, Publisher},
    services::HttpSession,
    storage::LocalStorage,
};
use clap::Parser;

/// Catalog Crawler - scrape listing and detail pages
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler", version, about = "Scrape listing and detail pages")]
struct Cli {
    /// Output directory for storing pages and the extract
    #[arg(short = 'd', long = "output-directory", alias = "output_directory")]
    output_directory: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "crawler.toml")]
    config: PathBuf,

    /// First listing page (overrides config)
    #[arg(long)]
    start_page: Option<u32>,

    /// Last listing page (overrides config)
    #[arg(long)]
    end_page: Option<u32>,

    /// Page renderer (overrides config)
    #[arg(long, value_enum)]
    renderer: Option<RendererKind>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
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

    let Some(output_dir) = cli.output_directory else {
        println!("Please provide an output directory using -d or --output-directory option.");
        return Ok(());
    };

    let mut config = Config::load_or_default(&cli.config);
    if let Some(page) = cli.start_page {
        config.site.start_page = page;
    }
    if let Some(page) = cli.end_page {
        config.site.end_page = page;
    }
    if let Some(renderer) = cli.renderer {
        config.crawler.renderer = renderer;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("Writing output to {}", output_dir.display());

    let storage = LocalStorage::new(&output_dir);
    let publisher = Publisher::from_config(&config).await?;

    match config.crawler.renderer {
        RendererKind::Http => {
            pipeline::run_crawler(
                &config,
                &storage,
                || future::ready(HttpSession::open(&config.crawler)),
                &publisher,
            )
            .await?;
        }
        #[cfg(feature = "browser")]
        RendererKind::Browser => {
            pipeline::run_crawler(
                &config,
                &storage,
                || catalog_crawler::services::BrowserSession::launch(&config.crawler),
                &publisher,
            )
            .await?;
        }
        #[cfg(not(feature = "browser"))]
        RendererKind::Browser => {
            return Err(catalog_crawler::error::AppError::config(
                "built without the `browser` feature",
            ));
        }
    }

    log::info!("Done!");

    Ok(())
}
