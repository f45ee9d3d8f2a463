use crate::config::FeedSpec;
use crate::fetcher::Fetcher;
use crate::traits::Collector;
use crate::types::{PipelineError, Record, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Feed reader: fetches every configured feed concurrently, keeps entries
/// inside the collection window, and upgrades each entry's content to the
/// linked page's text when that fetch succeeds.
pub struct RssCollector {
    feeds: Vec<FeedSpec>,
    fetcher: Arc<Fetcher>,
    cutoff: DateTime<Utc>,
}

impl RssCollector {
    pub fn new(feeds: Vec<FeedSpec>, fetcher: Arc<Fetcher>, window_days: i64) -> Self {
        Self {
            feeds,
            fetcher,
            cutoff: Utc::now() - Duration::days(window_days),
        }
    }

    async fn fetch_feed(&self, feed: &FeedSpec) -> Result<Vec<Record>> {
        let body = self.fetcher.get_text(&feed.url).await?;
        let mut records = parse_feed(&body, &feed.name, self.cutoff)?;

        // Prefer the linked page's full text; the feed-provided summary
        // already in `content` stays as the fallback.
        for record in &mut records {
            let page = self.fetcher.fetch_page(&record.url).await;
            if !page.is_empty() {
                record.content = page;
            }
        }

        info!("RSS {}: {} records", feed.name, records.len());
        Ok(records)
    }
}

#[async_trait]
impl Collector for RssCollector {
    fn name(&self) -> &str {
        "rss"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        let futures = self.feeds.iter().map(|feed| self.fetch_feed(feed));
        let results = join_all(futures).await;

        let mut records = Vec::new();
        for (feed, result) in self.feeds.iter().zip(results) {
            match result {
                Ok(items) => records.extend(items),
                Err(e) => warn!("RSS feed {} failed: {}", feed.name, e),
            }
        }
        Ok(records)
    }
}

/// Parse feed XML into records, applying the cutoff filter. Entries without
/// a link are skipped; entries without a timestamp pass through. Content is
/// the feed-provided summary or body at this stage.
pub fn parse_feed(body: &str, source_name: &str, cutoff: DateTime<Utc>) -> Result<Vec<Record>> {
    let feed = feed_rs::parser::parse(body.as_bytes())
        .map_err(|e| PipelineError::Parse(format!("feed {}: {}", source_name, e)))?;

    let mut records = Vec::new();
    for entry in feed.entries {
        let published = entry.published.or(entry.updated);
        if let Some(ts) = published {
            if ts < cutoff {
                continue;
            }
        }

        let url = match entry.links.first() {
            Some(link) => link.href.clone(),
            None => continue,
        };

        let title = entry
            .title
            .map(|t| t.content)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let content = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();

        let tags = entry.categories.into_iter().map(|c| c.term).collect();

        records.push(Record {
            title,
            url,
            source: format!("rss:{}", source_name),
            content,
            published_at: published,
            score: None,
            tags,
        });
    }

    Ok(records)
}
