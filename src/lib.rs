pub mod aggregator;
pub mod config;
pub mod dedup;
pub mod digest;
pub mod fetcher;
pub mod pipeline;
pub mod sources;
pub mod traits;
pub mod types;
pub mod utils;

pub use aggregator::Aggregator;
pub use config::{FeedSpec, FetchConfig, PipelineConfig};
pub use dedup::{deduplicate, deduplicate_with_threshold, normalize_url, token_sort_ratio};
pub use digest::{Digest, ExtractiveSummarizer, SelectedStory, Summarizer};
pub use fetcher::Fetcher;
pub use sources::{
    ArxivCollector, GithubTrendingCollector, HackerNewsCollector, RedditCollector, RssCollector,
};
pub use traits::Collector;
pub use types::{PipelineError, Record, Result};
