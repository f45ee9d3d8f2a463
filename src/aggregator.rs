use crate::traits::Collector;
use crate::types::Record;
use std::sync::Arc;
use tracing::{error, info};

/// Runs every configured collector concurrently and flattens the results.
///
/// Each collector is spawned as its own task and the whole group is awaited
/// as a join barrier: a collector that fails (or panics) contributes zero
/// records and never aborts its siblings. Successful results are concatenated
/// in collector-list order, each collector's internal ordering preserved.
pub struct Aggregator {
    collectors: Vec<Arc<dyn Collector>>,
}

impl Aggregator {
    pub fn new(collectors: Vec<Arc<dyn Collector>>) -> Self {
        Self { collectors }
    }

    pub async fn collect_all(&self) -> Vec<Record> {
        let mut handles = Vec::with_capacity(self.collectors.len());
        for collector in &self.collectors {
            let collector = Arc::clone(collector);
            let name = collector.name().to_string();
            handles.push((
                name,
                tokio::spawn(async move { collector.collect().await }),
            ));
        }

        let mut records = Vec::new();
        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(items)) => {
                    info!("{}: {} records", name, items.len());
                    records.extend(items);
                }
                Ok(Err(e)) => {
                    error!("{} failed: {}", name, e);
                }
                Err(e) => {
                    error!("{} aborted: {}", name, e);
                }
            }
        }

        records
    }
}
