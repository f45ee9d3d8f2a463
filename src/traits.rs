use crate::types::{Record, Result};
use async_trait::async_trait;

/// Trait for pulling recent content from one external source.
///
/// A collector absorbs every fault it can anticipate (HTTP errors, parse
/// errors, empty responses) and degrades to skipped items or an empty set.
/// Only unanticipated faults surface as `Err`; the orchestrator isolates
/// those per collector.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Short origin tag used in logs, e.g. "rss", "hackernews".
    fn name(&self) -> &str;

    /// Fetch items observed within the rolling collection window.
    async fn collect(&self) -> Result<Vec<Record>>;
}
