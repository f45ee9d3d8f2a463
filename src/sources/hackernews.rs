use crate::fetcher::Fetcher;
use crate::traits::Collector;
use crate::types::{Record, Result};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

const HN_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Ranked-list forum reader: unions the top and best story ID lists, fetches
/// items under a concurrency cap, and keeps high-score stories that match
/// the keyword list. Output is score-descending, capped at `max_stories`.
pub struct HackerNewsCollector {
    fetcher: Arc<Fetcher>,
    keywords: Vec<String>,
    min_score: i64,
    max_stories: usize,
    list_take: usize,
    concurrency: usize,
}

#[derive(Debug, Deserialize)]
pub struct HnItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub score: Option<i64>,
    pub text: Option<String>,
}

impl HackerNewsCollector {
    pub fn new(
        fetcher: Arc<Fetcher>,
        keywords: Vec<String>,
        min_score: i64,
        max_stories: usize,
        list_take: usize,
        concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            keywords,
            min_score,
            max_stories,
            list_take,
            concurrency,
        }
    }

    async fn fetch_story(&self, semaphore: Arc<Semaphore>, id: u64) -> Option<Record> {
        let _permit = semaphore.acquire().await.ok()?;

        let item: HnItem = self
            .fetcher
            .get_json(&format!("{}/item/{}.json", HN_API_BASE, id))
            .await
            .ok()?;

        if item.kind.as_deref() != Some("story") {
            return None;
        }
        let score = item.score.unwrap_or(0);
        if score < self.min_score {
            return None;
        }

        let title = item.title.unwrap_or_default();
        let url = item
            .url
            .clone()
            .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={}", id));
        if !is_relevant(&title, &url, &self.keywords) {
            return None;
        }

        // Linked-page content for external stories; the item's own text
        // (Ask HN, Show HN) is prepended when present.
        let mut content = String::new();
        if item.url.is_some() && !url.starts_with("https://news.ycombinator.com") {
            content = self.fetcher.fetch_page(&url).await;
        }
        if let Some(text) = item.text.filter(|t| !t.is_empty()) {
            content = if content.is_empty() {
                text
            } else {
                format!("{}\n\n{}", text, content)
            };
        }
        if content.is_empty() {
            content = title.clone();
        }

        let title = if title.is_empty() {
            "Untitled".to_string()
        } else {
            title
        };

        Some(Record {
            title,
            url,
            source: "hackernews".to_string(),
            content,
            published_at: None,
            score: Some(score),
            tags: vec!["hackernews".to_string()],
        })
    }
}

#[async_trait]
impl Collector for HackerNewsCollector {
    fn name(&self) -> &str {
        "hackernews"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        let mut story_ids: HashSet<u64> = HashSet::new();
        for endpoint in ["topstories", "beststories"] {
            match self
                .fetcher
                .get_json::<Vec<u64>>(&format!("{}/{}.json", HN_API_BASE, endpoint))
                .await
            {
                Ok(ids) => story_ids.extend(ids.into_iter().take(self.list_take)),
                Err(e) => warn!("HN {} fetch error: {}", endpoint, e),
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let futures = story_ids
            .iter()
            .map(|&id| self.fetch_story(Arc::clone(&semaphore), id));
        let results = join_all(futures).await;

        let mut records: Vec<Record> = results.into_iter().flatten().collect();
        records.sort_by(|a, b| b.score.unwrap_or(0).cmp(&a.score.unwrap_or(0)));
        records.truncate(self.max_stories);

        info!("HackerNews: {} records", records.len());
        Ok(records)
    }
}

/// Case-insensitive substring match of any keyword against title + URL.
pub fn is_relevant(title: &str, url: &str, keywords: &[String]) -> bool {
    let haystack = format!("{} {}", title, url).to_lowercase();
    keywords.iter().any(|kw| haystack.contains(kw.as_str()))
}
