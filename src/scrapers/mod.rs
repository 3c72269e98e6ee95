//! Scraping components for the TechCrunch listing site.
//!
//! Split in two:
//!
//! - [`fetcher`]: turns a URL into a parsed HTML document from behind
//!   rotating browser headers, one request at a time
//! - [`techcrunch`]: walks the paginated listing and lifts article records
//!   out of each page's cards
//!
//! Fetch failures are captured as session error messages and read as "no
//! more content"; they never abort the run.

pub mod fetcher;
pub mod techcrunch;
