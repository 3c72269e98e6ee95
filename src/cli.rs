//! Command-line interface definitions for the TechCrunch scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the scraper.
///
/// The page count is forced to be at least 1 by the value parser. The delay
/// bounds are validated together in `main` before the session starts, since
/// clap cannot express the cross-field `min <= max` constraint.
///
/// # Examples
///
/// ```sh
/// # Scrape the default 5 pages
/// crunch_news
///
/// # Scrape 10 pages with a tighter delay window
/// crunch_news -p 10 --delay-min 0.5 --delay-max 1.5
///
/// # Custom output location, no report
/// crunch_news -o latest.csv --output-dir ./data --no-report
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Number of listing pages to scrape
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Output CSV filename
    #[arg(short, long, default_value = "techcrunch_articles.csv")]
    pub output: String,

    /// Directory the CSV file is written into
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Minimum delay between page requests, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub delay_min: f64,

    /// Maximum delay between page requests, in seconds
    #[arg(long, default_value_t = 3.0)]
    pub delay_max: f64,

    /// Skip printing the scraping report
    #[arg(long)]
    pub no_report: bool,
}
