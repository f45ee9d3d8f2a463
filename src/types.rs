use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collected content item with provenance and metadata.
///
/// Records are immutable once a collector produces them; the dedup engine
/// builds new Records when it merges a cluster rather than updating inputs
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub url: String,
    /// Origin tag, e.g. "rss:techcrunch", "hackernews", "arxiv". Provenance
    /// only; never part of dedup identity.
    pub source: String,
    /// Full text or substantial excerpt, truncated by the collector.
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Upvotes, stars, etc. Ranking signal only.
    pub score: Option<i64>,
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no records collected from any source")]
    NothingCollected,

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
