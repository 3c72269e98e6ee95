//! Data model for scraped articles.
//!
//! A single run produces an ordered sequence of [`Article`] records, one per
//! listing-page card, in page order then card order within each page. The
//! record is flat on purpose: its field order is the column order of the CSV
//! output.

use crate::utils::content_hash;
use chrono::Local;
use serde::Serialize;

/// One article summary lifted from a listing-page card.
///
/// # Invariants
///
/// - `title` and `url` are never empty; cards that cannot supply both are
///   dropped during parsing instead of being emitted as partial records.
/// - `author` and `publish_time` are never empty strings; absent values
///   carry the sentinel `"Unknown"`.
/// - `content_hash` is derived from the normalized title, so two records
///   with the same title share a hash across runs.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Fixed name of the site the record came from.
    pub source: String,
    /// Normalized headline text.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// Byline, or `"Unknown"` when the card has none.
    pub author: String,
    /// Publish timestamp as `YYYY-MM-DD HH:MM`, a raw-attribute fallback,
    /// or `"Unknown"`.
    pub publish_time: String,
    /// Hex MD5 digest of the normalized title.
    pub content_hash: String,
    /// Reserved; always empty in this version.
    pub category: Option<String>,
    /// Reserved; always empty in this version.
    pub excerpt: Option<String>,
    /// Local wall-clock time the record was constructed.
    pub scraped_at: String,
}

impl Article {
    /// Build a record from parsed card fields.
    ///
    /// `title` must already be normalized; the content hash is derived from
    /// it here. The construction time is stamped into `scraped_at`.
    pub fn new(
        source: impl Into<String>,
        title: String,
        url: String,
        author: String,
        publish_time: String,
    ) -> Self {
        let content_hash = content_hash(&title);
        Self {
            source: source.into(),
            title,
            url,
            author,
            publish_time,
            content_hash,
            category: None,
            excerpt: None,
            scraped_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "TechCrunch",
            "Startup raises $10M".to_string(),
            "https://techcrunch.com/2024/01/15/startup-raises".to_string(),
            "Jane Doe".to_string(),
            "2024-01-15 10:30".to_string(),
        )
    }

    #[test]
    fn test_article_construction() {
        let article = sample();
        assert_eq!(article.source, "TechCrunch");
        assert_eq!(article.title, "Startup raises $10M");
        assert_eq!(article.author, "Jane Doe");
        assert!(article.category.is_none());
        assert!(article.excerpt.is_none());
    }

    #[test]
    fn test_content_hash_follows_title() {
        let a = sample();
        let b = sample();
        assert_eq!(a.content_hash, b.content_hash);

        let other = Article::new(
            "TechCrunch",
            "A different headline".to_string(),
            "https://techcrunch.com/other".to_string(),
            "Unknown".to_string(),
            "Unknown".to_string(),
        );
        assert_ne!(a.content_hash, other.content_hash);
    }

    #[test]
    fn test_scraped_at_is_stamped() {
        let article = sample();
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(article.scraped_at.len(), 19);
        assert_eq!(&article.scraped_at[4..5], "-");
        assert_eq!(&article.scraped_at[10..11], " ");
    }

    #[test]
    fn test_csv_serialization_shape() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(sample()).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut lines = data.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source,title,url,author,publish_time,content_hash,category,excerpt,scraped_at"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("TechCrunch,Startup raises $10M,"));
        // Reserved fields serialize as empty cells
        assert!(row.contains(",,"));
    }
}
