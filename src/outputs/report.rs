//! Plain-text run report.
//!
//! Rendered once at the end of a session and printed to stdout, separate
//! from the tracing log stream: this is the operator-facing summary of what
//! the run produced.

use crate::models::Article;
use itertools::Itertools;
use std::fmt::Write;

const BANNER: &str = "==================================================";

/// How many of the most prolific authors the report lists.
const TOP_AUTHOR_COUNT: usize = 3;

/// Render the end-of-run summary.
///
/// Shows totals, the pages attempted, every captured error message, the
/// newest and oldest article in scrape order, and the busiest bylines.
/// Articles with the `"Unknown"` byline stay out of the author ranking.
pub fn render(articles: &[Article], pages_attempted: u32, errors: &[String]) -> String {
    let mut out = String::new();

    writeln!(out).unwrap();
    writeln!(out, "{BANNER}").unwrap();
    writeln!(out, "SCRAPING REPORT").unwrap();
    writeln!(out, "{BANNER}").unwrap();
    writeln!(out, "Total articles scraped: {}", articles.len()).unwrap();
    writeln!(out, "Pages attempted: {pages_attempted}").unwrap();
    writeln!(out, "Errors encountered: {}", errors.len()).unwrap();

    if !errors.is_empty() {
        writeln!(out, "\nErrors:").unwrap();
        for error in errors {
            writeln!(out, "  - {error}").unwrap();
        }
    }

    if let (Some(latest), Some(oldest)) = (articles.first(), articles.last()) {
        writeln!(out, "\nLatest article: {}", latest.title).unwrap();
        writeln!(out, "Oldest article: {}", oldest.title).unwrap();

        let ranked = top_authors(articles);
        if !ranked.is_empty() {
            writeln!(out, "\nTop authors:").unwrap();
            for (author, count) in ranked {
                writeln!(out, "  - {author}: {count} articles").unwrap();
            }
        }
    }

    writeln!(out, "{BANNER}").unwrap();
    out
}

/// Tally named bylines and keep the busiest few.
///
/// Ties break alphabetically so the ranking is stable.
fn top_authors(articles: &[Article]) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = articles
        .iter()
        .filter(|article| article.author != "Unknown")
        .counts_by(|article| article.author.as_str())
        .into_iter()
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_AUTHOR_COUNT);
    ranked
}
