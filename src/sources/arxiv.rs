use crate::fetcher::Fetcher;
use crate::traits::Collector;
use crate::types::{PipelineError, Record, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Paper-repository reader: queries the search endpoint with an OR'd
/// category filter, newest submissions first, and composes record content
/// from authors, abstract, and the PDF link.
pub struct ArxivCollector {
    fetcher: Arc<Fetcher>,
    categories: Vec<String>,
    max_results: usize,
    cutoff: DateTime<Utc>,
}

impl ArxivCollector {
    pub fn new(
        fetcher: Arc<Fetcher>,
        categories: Vec<String>,
        max_results: usize,
        window_days: i64,
    ) -> Self {
        Self {
            fetcher,
            categories,
            max_results,
            cutoff: Utc::now() - Duration::days(window_days),
        }
    }
}

#[async_trait]
impl Collector for ArxivCollector {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        let query = self
            .categories
            .iter()
            .map(|cat| format!("cat:{}", cat))
            .collect::<Vec<_>>()
            .join(" OR ");

        let url = Url::parse_with_params(
            ARXIV_API_URL,
            &[
                ("search_query", query.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
                ("max_results", &self.max_results.to_string()),
            ],
        )?;

        let body = match self.fetcher.get_text(url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("ArXiv API error: {}", e);
                return Ok(Vec::new());
            }
        };

        let records = match parse_response(&body, self.cutoff) {
            Ok(records) => records,
            Err(e) => {
                warn!("ArXiv parse error: {}", e);
                return Ok(Vec::new());
            }
        };

        info!("ArXiv: {} records", records.len());
        Ok(records)
    }
}

/// Parse the Atom search response into records, applying the cutoff filter.
pub fn parse_response(body: &str, cutoff: DateTime<Utc>) -> Result<Vec<Record>> {
    let feed = feed_rs::parser::parse(body.as_bytes())
        .map_err(|e| PipelineError::Parse(format!("arxiv response: {}", e)))?;

    let mut records = Vec::new();
    for entry in feed.entries {
        let published = entry.published;
        if let Some(ts) = published {
            if ts < cutoff {
                continue;
            }
        }

        // Paper titles wrap across lines in the response; collapse them.
        let title = entry
            .title
            .map(|t| t.content.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let abstract_text = entry
            .summary
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default();

        let mut url = String::new();
        let mut pdf_url = String::new();
        for link in &entry.links {
            let rel = link.rel.as_deref().unwrap_or("");
            let media_type = link.media_type.as_deref().unwrap_or("");
            if media_type == "text/html" || rel == "alternate" {
                url = link.href.clone();
            } else if link.href.contains("pdf") || media_type == "application/pdf" {
                pdf_url = link.href.clone();
            }
        }
        if url.is_empty() {
            url = entry.id.clone();
        }

        let authors: Vec<String> = entry
            .authors
            .iter()
            .map(|a| a.name.trim().to_string())
            .collect();

        let tags: Vec<String> = entry.categories.into_iter().map(|c| c.term).collect();

        let mut content = format!("Authors: {}\n\n{}", authors.join(", "), abstract_text);
        if !pdf_url.is_empty() {
            content.push_str(&format!("\n\nPDF: {}", pdf_url));
        }

        records.push(Record {
            title,
            url,
            source: "arxiv".to_string(),
            content,
            published_at: published,
            score: None,
            tags,
        });
    }

    Ok(records)
}
