use crate::fetcher::Fetcher;
use crate::traits::Collector;
use crate::types::{Record, Result};
use crate::utils::truncate_chars;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

const GITHUB_SEARCH_URL: &str = "https://api.github.com/search/repositories";
const README_CHAR_CAP: usize = 2_000;

/// Code-repository search reader: one search query per topic keyword,
/// constrained by star count and recent pushes, with a best-effort readme
/// excerpt per result. Results are deduplicated by URL across topics and
/// returned stars-descending, capped at `max_repos`.
pub struct GithubTrendingCollector {
    fetcher: Arc<Fetcher>,
    topics: Vec<String>,
    min_stars: u32,
    max_repos: usize,
    window_days: i64,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
pub struct RepoItem {
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl GithubTrendingCollector {
    pub fn new(
        fetcher: Arc<Fetcher>,
        topics: Vec<String>,
        min_stars: u32,
        max_repos: usize,
        window_days: i64,
        token: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            topics,
            min_stars,
            max_repos,
            window_days,
            token,
        }
    }

    fn headers(&self, accept: &'static str) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", accept.to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("token {}", token)));
        }
        headers
    }

    async fn search_topic(&self, topic: &str, date_cutoff: &str) -> Result<Vec<Record>> {
        let query = format!(
            "topic:{} stars:>{} pushed:>{}",
            topic, self.min_stars, date_cutoff
        );
        let url = Url::parse_with_params(
            GITHUB_SEARCH_URL,
            &[
                ("q", query.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", "10"),
            ],
        )?;

        let headers = self.headers("application/vnd.github.v3+json");
        let header_refs: Vec<(&str, &str)> =
            headers.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let response: SearchResponse = self
            .fetcher
            .get_json_with_headers(url.as_str(), &header_refs)
            .await?;

        let mut records = Vec::new();
        for repo in response.items {
            let readme = self.fetch_readme(&repo.full_name).await;
            records.push(record_from_repo(repo, &readme, topic));
        }
        Ok(records)
    }

    async fn fetch_readme(&self, repo_name: &str) -> String {
        let url = format!("https://api.github.com/repos/{}/readme", repo_name);
        let headers = self.headers("application/vnd.github.raw");
        let header_refs: Vec<(&str, &str)> =
            headers.iter().map(|(k, v)| (*k, v.as_str())).collect();
        match self.fetcher.get_text_with_headers(&url, &header_refs).await {
            Ok(text) => truncate_chars(&text, README_CHAR_CAP),
            Err(_) => String::new(),
        }
    }
}

#[async_trait]
impl Collector for GithubTrendingCollector {
    fn name(&self) -> &str {
        "github"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        let date_cutoff = (Utc::now() - Duration::days(self.window_days))
            .format("%Y-%m-%d")
            .to_string();

        let mut records = Vec::new();
        for topic in &self.topics {
            match self.search_topic(topic, &date_cutoff).await {
                Ok(repos) => records.extend(repos),
                Err(e) => warn!("GitHub search error for {}: {}", topic, e),
            }
        }

        // The same repo surfaces under several topics; keep the first hit.
        let mut seen = HashSet::new();
        let mut unique: Vec<Record> = Vec::new();
        for record in records {
            if seen.insert(record.url.clone()) {
                unique.push(record);
            }
        }

        unique.sort_by(|a, b| b.score.unwrap_or(0).cmp(&a.score.unwrap_or(0)));
        unique.truncate(self.max_repos);

        info!("GitHub trending: {} records", unique.len());
        Ok(unique)
    }
}

/// Build a record from one search result plus its readme excerpt.
pub fn record_from_repo(repo: RepoItem, readme: &str, topic: &str) -> Record {
    let mut content_parts = vec![repo.description.clone().unwrap_or_default()];
    if let Some(language) = &repo.language {
        content_parts.push(format!("Language: {}", language));
    }
    content_parts.push(format!("Stars: {}", repo.stargazers_count));
    if !repo.topics.is_empty() {
        content_parts.push(format!("Topics: {}", repo.topics.join(", ")));
    }
    if !readme.is_empty() {
        content_parts.push(format!("\nREADME excerpt:\n{}", readme));
    }

    let tags = if repo.topics.is_empty() {
        vec![topic.to_string()]
    } else {
        repo.topics.clone()
    };

    let title = if repo.full_name.is_empty() {
        "Untitled".to_string()
    } else {
        repo.full_name
    };

    Record {
        title,
        url: repo.html_url,
        source: "github".to_string(),
        content: content_parts.join("\n"),
        published_at: None,
        score: Some(repo.stargazers_count),
        tags,
    }
}
