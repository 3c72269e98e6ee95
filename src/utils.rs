//! Text cleaning, hashing, and file system helpers.
//!
//! This module provides the small pure helpers used throughout the scraper:
//! - Whitespace normalization for scraped text fragments
//! - Content hashing for stable article identity keys
//! - File system validation for the output directory

use md5::{Digest, Md5};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse all whitespace runs into single spaces and trim the ends.
///
/// Scraped text fragments arrive with newlines, tabs, and indentation from
/// the page markup. This reduces them to clean single-line text.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  Hello\n\t world  "), "Hello world");
/// assert_eq!(normalize("\n \t"), "");
/// ```
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase hex MD5 digest of `text`.
///
/// Identical input always produces the identical digest, across calls and
/// across runs, so the digest of a normalized title works as a stable
/// identity key for an article.
pub fn content_hash(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
