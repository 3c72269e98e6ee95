//! CSV output for scraped article records.
//!
//! One row per article, in scrape order. The header row and column order
//! come from the field order on [`Article`]; the reserved `category` and
//! `excerpt` fields serialize as empty cells.

use crate::models::Article;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `articles` into `{output_dir}/{filename}`.
///
/// The records are written in the order given, preserving the page-then-card
/// ordering of the scrape session.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
/// The output directory is expected to exist already (it is probed at
/// startup).
#[instrument(level = "info", skip(articles))]
pub async fn write_articles(
    articles: &[Article],
    output_dir: &str,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for article in articles {
        writer.serialize(article)?;
    }
    let data = writer.into_inner()?;

    let path = format!("{}/{}", output_dir.trim_end_matches('/'), filename);
    fs::write(&path, data).await?;
    info!(path = %path, count = articles.len(), "Wrote article CSV");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article::new(
            "TechCrunch",
            title.to_string(),
            format!("https://techcrunch.com/{title}"),
            "Jane Doe".to_string(),
            "2024-01-15 10:30".to_string(),
        )
    }

    #[tokio::test]
    async fn test_write_articles_roundtrip_shape() {
        let dir = std::env::temp_dir().join("crunch_news_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_str().unwrap().to_string();

        let articles = vec![article("first"), article("second")];
        write_articles(&articles, &dir_str, "out.csv").await.unwrap();

        let written = std::fs::read_to_string(dir.join("out.csv")).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source,title,url,author,publish_time,content_hash,category,excerpt,scraped_at"
        );
        assert!(lines.next().unwrap().contains("first"));
        assert!(lines.next().unwrap().contains("second"));
        assert!(lines.next().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_write_articles_quotes_embedded_commas() {
        let dir = std::env::temp_dir().join("crunch_news_csv_quote_test");
        std::fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_str().unwrap().to_string();

        let articles = vec![article("Funding, growth, and an exit")];
        write_articles(&articles, &dir_str, "out.csv").await.unwrap();

        let written = std::fs::read_to_string(dir.join("out.csv")).unwrap();
        assert!(written.contains("\"Funding, growth, and an exit\""));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
