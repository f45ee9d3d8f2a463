use crate::aggregator::Aggregator;
use crate::config::PipelineConfig;
use crate::dedup::deduplicate_with_threshold;
use crate::digest::{Digest, ExtractiveSummarizer, Summarizer};
use crate::fetcher::Fetcher;
use crate::sources::{
    ArxivCollector, GithubTrendingCollector, HackerNewsCollector, RedditCollector, RssCollector,
};
use crate::traits::Collector;
use crate::types::{PipelineError, Result};
use std::sync::Arc;
use tracing::info;

/// Run the full pipeline: collect from every source, deduplicate, summarize.
///
/// A run that collects nothing is a hard stop — no digest can be produced —
/// surfaced as [`PipelineError::NothingCollected`] rather than an empty
/// digest.
pub async fn run(config: &PipelineConfig) -> Result<Digest> {
    let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);

    let collectors: Vec<Arc<dyn Collector>> = vec![
        Arc::new(RssCollector::new(
            config.feeds.clone(),
            Arc::clone(&fetcher),
            config.window_days,
        )),
        Arc::new(HackerNewsCollector::new(
            Arc::clone(&fetcher),
            config.keywords.clone(),
            config.hn_min_score,
            config.hn_max_stories,
            config.hn_list_take,
            config.hn_concurrency,
        )),
        Arc::new(RedditCollector::new(
            Arc::clone(&fetcher),
            config.subreddits.clone(),
            config.reddit_min_score,
            config.reddit_max_comments,
        )),
        Arc::new(ArxivCollector::new(
            Arc::clone(&fetcher),
            config.arxiv_categories.clone(),
            config.arxiv_max_results,
            config.window_days,
        )),
        Arc::new(GithubTrendingCollector::new(
            Arc::clone(&fetcher),
            config.github_topics.clone(),
            config.github_min_stars,
            config.github_max_repos,
            config.window_days,
            config.github_token.clone(),
        )),
    ];

    let aggregator = Aggregator::new(collectors);
    let records = aggregator.collect_all().await;
    info!("Collected {} total records", records.len());

    if records.is_empty() {
        return Err(PipelineError::NothingCollected);
    }

    let unique = deduplicate_with_threshold(records, config.fuzzy_title_threshold);
    info!("Deduplicated to {} unique records", unique.len());

    let summarizer = ExtractiveSummarizer::new(config.keywords.clone(), config.max_stories);
    summarizer.summarize(&unique).await
}
