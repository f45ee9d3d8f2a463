use crate::fetcher::Fetcher;
use crate::traits::Collector;
use crate::types::{Record, Result};
use crate::utils::truncate_chars;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

const COMMENT_CHAR_CAP: usize = 500;

/// Community-list forum reader: fetches each configured community's weekly
/// top listing, keeps posts above the score floor, and augments post content
/// with a bounded number of top comment bodies.
pub struct RedditCollector {
    fetcher: Arc<Fetcher>,
    subreddits: Vec<String>,
    min_score: i64,
    max_comments: usize,
}

#[derive(Debug, Deserialize)]
pub struct RedditListing {
    pub data: RedditListingData,
}

#[derive(Debug, Deserialize)]
pub struct RedditListingData {
    #[serde(default)]
    pub children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
pub struct RedditChild {
    pub data: RedditItemData,
}

/// Shared shape for post and comment payloads; fields default so one struct
/// covers both listings.
#[derive(Debug, Default, Deserialize)]
pub struct RedditItemData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub permalink: String,
    pub body: Option<String>,
}

impl RedditCollector {
    pub fn new(
        fetcher: Arc<Fetcher>,
        subreddits: Vec<String>,
        min_score: i64,
        max_comments: usize,
    ) -> Self {
        Self {
            fetcher,
            subreddits,
            min_score,
            max_comments,
        }
    }

    async fn fetch_subreddit(&self, subreddit: &str) -> Result<Vec<Record>> {
        let url = format!(
            "https://www.reddit.com/r/{}/top.json?t=week&limit=10",
            subreddit
        );
        let listing: RedditListing = self.fetcher.get_json(&url).await?;

        let mut records = Vec::new();
        for child in listing.data.children {
            let post = child.data;
            if post.score < self.min_score {
                continue;
            }

            let title = if post.title.is_empty() {
                "Untitled".to_string()
            } else {
                post.title.clone()
            };

            // Self-text posts carry their own body; link posts fall back to
            // the title as base content.
            let mut content = if post.selftext.is_empty() {
                title.clone()
            } else {
                post.selftext.clone()
            };

            if !post.permalink.is_empty() {
                let comments = self.fetch_top_comments(&post.permalink).await;
                if !comments.is_empty() {
                    content.push_str("\n\n--- Top Comments ---\n");
                    content.push_str(&comments.join("\n"));
                }
            }

            let url = if post.url.is_empty() {
                format!("https://www.reddit.com{}", post.permalink)
            } else {
                post.url
            };

            records.push(Record {
                title,
                url,
                source: format!("reddit:r/{}", subreddit),
                content,
                published_at: None,
                score: Some(post.score),
                tags: vec![subreddit.to_string()],
            });
        }

        info!("Reddit r/{}: {} records", subreddit, records.len());
        Ok(records)
    }

    async fn fetch_top_comments(&self, permalink: &str) -> Vec<String> {
        let url = format!("https://www.reddit.com{}.json?limit=5", permalink);
        let pages: Vec<RedditListing> = match self.fetcher.get_json(&url).await {
            Ok(pages) => pages,
            Err(_) => return Vec::new(),
        };

        // The second element of the response holds the comment tree.
        let Some(comment_page) = pages.get(1) else {
            return Vec::new();
        };

        comment_page
            .data
            .children
            .iter()
            .take(self.max_comments)
            .filter_map(|child| {
                let body = child.data.body.as_deref()?;
                if body.is_empty() || body == "[deleted]" {
                    return None;
                }
                Some(truncate_chars(body, COMMENT_CHAR_CAP))
            })
            .collect()
    }
}

#[async_trait]
impl Collector for RedditCollector {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        let futures = self
            .subreddits
            .iter()
            .map(|subreddit| self.fetch_subreddit(subreddit));
        let results = join_all(futures).await;

        let mut records = Vec::new();
        for (subreddit, result) in self.subreddits.iter().zip(results) {
            match result {
                Ok(items) => records.extend(items),
                Err(e) => warn!("Failed to fetch r/{}: {}", subreddit, e),
            }
        }
        Ok(records)
    }
}
