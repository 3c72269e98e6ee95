//! HTTP fetching for listing pages.
//!
//! One GET at a time, dressed up as a browser: the User-Agent rotates
//! through a fixed pool and the remaining headers match what a desktop
//! browser would send for a page navigation. A single `reqwest::Client`
//! is built per session and holds the connection pool until the session
//! is dropped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION,
    USER_AGENT,
};
use reqwest::{Client, StatusCode};
use scraper::Html;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Pool of User-Agent strings rotated per request.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPad; CPU OS 14_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
];

/// Total request timeout, covering connect and body read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ceiling on pooled connections to the site. Only one request is ever in
/// flight, so this bounds idle keep-alive connections.
const MAX_POOL_CONNECTIONS: usize = 10;

/// Failure of a single page request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a status other than 200.
    #[error("HTTP {0}")]
    Status(u16),
    /// Transport-level failure: connect, timeout, or body read.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// Fetches listing pages and parses them into HTML documents.
pub struct PageFetcher {
    client: Client,
    rng: StdRng,
}

impl PageFetcher {
    /// Create a fetcher with an OS-seeded randomness source.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a fetcher with a caller-supplied randomness source.
    ///
    /// A seeded `StdRng` makes the User-Agent rotation deterministic,
    /// which tests rely on.
    pub fn with_rng(rng: StdRng) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(MAX_POOL_CONNECTIONS)
            .build()?;
        Ok(Self { client, rng })
    }

    /// Fetch `url` and parse the body into a traversable document.
    ///
    /// Only status 200 counts as success. Every other status, and any
    /// transport failure, comes back as a `FetchError` for the caller to
    /// record.
    pub async fn fetch(&mut self, url: &str) -> Result<Html, FetchError> {
        let headers = self.browser_headers();
        debug!(%url, "Requesting listing page");

        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(Html::parse_document(&body))
    }

    /// Build browser-shaped request headers with a rotated User-Agent.
    fn browser_headers(&mut self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(USER_AGENT, HeaderValue::from_static(self.random_user_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            HeaderName::from_static("upgrade-insecure-requests"),
            HeaderValue::from_static("1"),
        );

        headers
    }

    /// Pick a User-Agent uniformly at random from the pool.
    fn random_user_agent(&mut self) -> &'static str {
        USER_AGENTS[self.rng.random_range(0..USER_AGENTS.len())]
    }
}
