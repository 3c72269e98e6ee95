//! # Crunch News
//!
//! A TechCrunch listing-page scraper that collects article metadata (title,
//! URL, author, publish time) into a CSV file.
//!
//! ## Features
//!
//! - Sequential page-by-page scraping with a configurable page budget
//! - Rotating browser User-Agent headers and a fixed request timeout
//! - Randomized delay between pages to stay polite
//! - Early stop when a page comes back empty ("no more content")
//! - Fetch failures captured into a session error log and surfaced in the
//!   end-of-run report
//!
//! ## Usage
//!
//! ```sh
//! crunch_news --pages 10 --output techcrunch_articles.csv
//! ```
//!
//! ## Architecture
//!
//! One pass, strictly in order:
//! 1. **Scrape**: walk listing pages 1..N, parsing article cards from each
//! 2. **Write**: serialize the collected records to a CSV file
//! 3. **Report**: print a summary with counts, errors, and top authors

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::techcrunch::TechCrunchScraper;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("crunch_news starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // clap already enforces pages >= 1; the delay bounds are a cross-field
    // constraint checked here
    if args.delay_min < 0.0 || args.delay_max < args.delay_min {
        error!(
            delay_min = args.delay_min,
            delay_max = args.delay_max,
            "Invalid delay parameters (need 0 <= min <= max)"
        );
        return Err("invalid delay parameters".into());
    }

    // Early check: ensure the output dir is writable before spending time
    // on the network
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    info!(
        pages = args.pages,
        delay_min = args.delay_min,
        delay_max = args.delay_max,
        output = %args.output,
        "Starting TechCrunch scrape"
    );

    // ---- Scrape session ----
    let mut scraper = TechCrunchScraper::new(args.pages, (args.delay_min, args.delay_max))?;
    let articles = scraper.scrape_all().await;

    if articles.is_empty() {
        warn!("No articles were scraped successfully");
    } else {
        outputs::csv::write_articles(&articles, &args.output_dir, &args.output).await?;

        if !args.no_report {
            let report = outputs::report::render(&articles, args.pages, scraper.errors());
            println!("{report}");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = articles.len(),
        errors = scraper.errors().len(),
        "Execution complete"
    );

    Ok(())
}
