//! TechCrunch listing-page scraper.
//!
//! Walks the paginated article listing one page at a time, lifting an
//! [`Article`] out of every `loop-card` fragment, until the page budget is
//! spent or a page comes back empty. An empty page, whether from a fetch
//! failure or from markup with no matching cards, reads as "no more
//! content" and ends the run; there is no retry.
//!
//! # URL Pattern
//!
//! Page 1 is the site origin itself; later pages live at
//! `https://techcrunch.com/page/<n>/`. Relative article links are resolved
//! against the origin.

use crate::models::Article;
use crate::scrapers::fetcher::{FetchError, PageFetcher};
use crate::utils::normalize;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scraper::{ElementRef, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};
use url::Url;

/// Origin the listing pages hang off of.
pub const BASE_URL: &str = "https://techcrunch.com";

/// Name stamped into every record's `source` column.
const SOURCE_NAME: &str = "TechCrunch";

/// Byline and timestamp sentinel for cards missing those fields.
const UNKNOWN: &str = "Unknown";

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.loop-card__content").unwrap());
static TITLE_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.loop-card__title-link").unwrap());
static AUTHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.loop-card__author").unwrap());
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

/// Drives the fetch-parse-accumulate loop across a bounded page range.
///
/// Session state lives only for one run: the fetcher with its connection
/// pool, the page budget, the delay bounds, and the append-only error log.
pub struct TechCrunchScraper {
    fetcher: PageFetcher,
    base_url: String,
    max_pages: u32,
    delay_range: (f64, f64),
    errors: Vec<String>,
    rng: StdRng,
}

impl TechCrunchScraper {
    /// Create a scraper against the production origin.
    ///
    /// `delay_range` is the `[min, max]` bound in seconds for the random
    /// pause between consecutive pages.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(max_pages: u32, delay_range: (f64, f64)) -> Result<Self, FetchError> {
        Self::with_base_url(BASE_URL, max_pages, delay_range)
    }

    /// Create a scraper against a different origin.
    ///
    /// Tests point this at a local mock server; everything else behaves
    /// identically.
    pub fn with_base_url(
        base_url: &str,
        max_pages: u32,
        delay_range: (f64, f64),
    ) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: PageFetcher::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_pages,
            delay_range,
            errors: Vec::new(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Seeded variant of [`Self::with_base_url`].
    ///
    /// Fixes both the header rotation and the delay draws so a test run is
    /// fully deterministic.
    pub fn with_seed(
        base_url: &str,
        max_pages: u32,
        delay_range: (f64, f64),
        seed: u64,
    ) -> Result<Self, FetchError> {
        let mut scraper = Self::with_base_url(base_url, max_pages, delay_range)?;
        scraper.fetcher = PageFetcher::with_rng(StdRng::seed_from_u64(seed))?;
        scraper.rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        Ok(scraper)
    }

    /// Error messages collected over the session, in occurrence order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Scrape articles from up to `max_pages` listing pages.
    ///
    /// Returns records in page order, then card order within each page.
    /// Exhausting the budget and stopping early on an empty page are both
    /// normal completion.
    #[instrument(level = "info", skip(self), fields(max_pages = self.max_pages))]
    pub async fn scrape_all(&mut self) -> Vec<Article> {
        let mut all_articles = Vec::new();

        for page in 1..=self.max_pages {
            let articles = self.scrape_page(page).await;
            let found = articles.len();
            all_articles.extend(articles);

            // An empty page means the listing ran out
            if found == 0 {
                info!(page, "No articles found, stopping");
                break;
            }

            if page < self.max_pages {
                self.random_delay().await;
            }
        }

        info!(count = all_articles.len(), "Scrape session complete");
        all_articles
    }

    /// Scrape a single listing page. A failed fetch yields an empty vector.
    async fn scrape_page(&mut self, page: u32) -> Vec<Article> {
        let url = self.page_url(page);
        info!(page, %url, "Scraping listing page");

        let document = match self.fetcher.fetch(&url).await {
            Ok(document) => document,
            Err(e) => {
                self.record_failure(&url, e);
                return Vec::new();
            }
        };

        let articles: Vec<Article> = document
            .select(&CARD_SELECTOR)
            .filter_map(|card| self.parse_card(card))
            .collect();

        info!(page, count = articles.len(), "Parsed listing page");
        articles
    }

    fn page_url(&self, page: u32) -> String {
        if page == 1 {
            self.base_url.clone()
        } else {
            format!("{}/page/{}/", self.base_url, page)
        }
    }

    /// Append the failure to the session log and surface it immediately.
    fn record_failure(&mut self, url: &str, err: FetchError) {
        let message = match err {
            FetchError::Status(code) => format!("Failed to fetch {url}: HTTP {code}"),
            FetchError::Http(e) => format!("Exception while fetching {url}: {e}"),
        };
        error!("{message}");
        self.errors.push(message);
    }

    /// Parse one card into an [`Article`].
    ///
    /// Cards without a title link, with a title that normalizes to nothing,
    /// or without a usable URL are skipped silently. Missing bylines and
    /// timestamps degrade to the `"Unknown"` sentinel instead.
    fn parse_card(&self, card: ElementRef<'_>) -> Option<Article> {
        let title_link = card.select(&TITLE_LINK_SELECTOR).next()?;

        let title = normalize(&title_link.text().collect::<String>());
        if title.is_empty() {
            return None;
        }

        let href = title_link.value().attr("href").unwrap_or("");
        if href.is_empty() {
            return None;
        }
        let url = self.resolve_url(href)?;

        let author = card
            .select(&AUTHOR_SELECTOR)
            .next()
            .map(|el| normalize(&el.text().collect::<String>()))
            .filter(|author| !author.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let publish_time = card
            .select(&TIME_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .map(format_publish_time)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Some(Article::new(SOURCE_NAME, title, url, author, publish_time))
    }

    /// Resolve a card's `href` to an absolute URL against the origin.
    fn resolve_url(&self, href: &str) -> Option<String> {
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        let base = Url::parse(&self.base_url).ok()?;
        base.join(href).ok().map(|resolved| resolved.to_string())
    }

    /// Pause for a uniform random duration from the configured interval.
    async fn random_delay(&mut self) {
        let (min, max) = self.delay_range;
        let secs = self.rng.random_range(min..=max);
        sleep(Duration::from_secs_f64(secs)).await;
    }
}

/// Reformat a card's machine-readable timestamp for the output table.
///
/// Well-formed timestamps come out as `YYYY-MM-DD HH:MM`. A trailing `Z`
/// reads as the `+00:00` offset, offset-less and date-only values still
/// count as well-formed. Anything unparseable falls back to the first 19
/// characters of the raw attribute, and an empty attribute is `"Unknown"`.
fn format_publish_time(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return format!("{} 00:00", date.format("%Y-%m-%d"));
    }
    raw.chars().take(19).collect()
}
