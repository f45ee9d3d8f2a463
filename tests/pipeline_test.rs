use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Once;
use tech_digest::{
    deduplicate, Aggregator, Collector, ExtractiveSummarizer, PipelineError, Record, Result,
    Summarizer,
};
use tracing::info;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

fn record(title: &str, url: &str, source: &str, content: &str) -> Record {
    Record {
        title: title.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        content: content.to_string(),
        published_at: None,
        score: None,
        tags: Vec::new(),
    }
}

/// Stub collector returning a fixed record set.
struct StaticCollector {
    name: &'static str,
    records: Vec<Record>,
}

#[async_trait]
impl Collector for StaticCollector {
    fn name(&self) -> &str {
        self.name
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

/// Stub collector that always fails.
struct FailingCollector;

#[async_trait]
impl Collector for FailingCollector {
    fn name(&self) -> &str {
        "failing"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        Err(PipelineError::General("simulated collector failure".to_string()))
    }
}

/// Stub collector that panics mid-collection.
struct PanickingCollector;

#[async_trait]
impl Collector for PanickingCollector {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn collect(&self) -> Result<Vec<Record>> {
        panic!("simulated programming error");
    }
}

#[tokio::test]
async fn test_partial_failure_isolation() {
    init_tracing();

    let first = StaticCollector {
        name: "first",
        records: vec![
            record("A", "https://a.com/1", "first", "aaa"),
            record("B", "https://a.com/2", "first", "bbb"),
        ],
    };
    let second = StaticCollector {
        name: "second",
        records: vec![
            record("C", "https://b.com/1", "second", "ccc"),
            record("D", "https://b.com/2", "second", "ddd"),
            record("E", "https://b.com/3", "second", "eee"),
        ],
    };

    let aggregator = Aggregator::new(vec![
        Arc::new(first),
        Arc::new(FailingCollector),
        Arc::new(second),
    ]);
    let records = aggregator.collect_all().await;

    // The failing collector contributes zero records; the others are intact.
    assert_eq!(records.len(), 5);
    info!("Aggregated {} records despite one failure", records.len());
}

#[tokio::test]
async fn test_panicking_collector_is_isolated() {
    init_tracing();

    let survivor = StaticCollector {
        name: "survivor",
        records: vec![record("A", "https://a.com/1", "survivor", "aaa")],
    };

    let aggregator = Aggregator::new(vec![Arc::new(PanickingCollector), Arc::new(survivor)]);
    let records = aggregator.collect_all().await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "A");
}

#[tokio::test]
async fn test_results_keep_collector_list_order() {
    init_tracing();

    let first = StaticCollector {
        name: "first",
        records: vec![
            record("A1", "https://a.com/1", "first", "aaa"),
            record("A2", "https://a.com/2", "first", "bbb"),
        ],
    };
    let second = StaticCollector {
        name: "second",
        records: vec![record("B1", "https://b.com/1", "second", "ccc")],
    };

    let aggregator = Aggregator::new(vec![Arc::new(first), Arc::new(second)]);
    let records = aggregator.collect_all().await;

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A1", "A2", "B1"]);
}

#[tokio::test]
async fn test_all_collectors_failing_yields_empty_aggregate() {
    init_tracing();

    let aggregator = Aggregator::new(vec![
        Arc::new(FailingCollector),
        Arc::new(PanickingCollector),
    ]);
    let records = aggregator.collect_all().await;
    assert!(records.is_empty());

    // The empty aggregate maps to the explicit hard-stop condition.
    let error = PipelineError::NothingCollected;
    assert_eq!(error.to_string(), "no records collected from any source");
}

#[tokio::test]
async fn test_collect_dedup_summarize_end_to_end() {
    init_tracing();

    let feed_like = StaticCollector {
        name: "feedlike",
        records: vec![
            record(
                "Open source LLM released",
                "https://example.com/story?utm_source=rss",
                "rss:test",
                "A new open source large language model was released today.",
            ),
            record("Gardening tips for spring", "https://example.com/garden", "rss:test", "Water your plants."),
        ],
    };
    let forum_like = StaticCollector {
        name: "forumlike",
        records: vec![record(
            "Open source LLM released",
            "https://www.example.com/story/",
            "hackernews",
            "A new open source large language model was released today. Benchmarks inside.",
        )],
    };

    let aggregator = Aggregator::new(vec![Arc::new(feed_like), Arc::new(forum_like)]);
    let records = aggregator.collect_all().await;
    assert_eq!(records.len(), 3);

    let unique = deduplicate(records);
    assert_eq!(unique.len(), 2);
    // The duplicated story kept the longer content from the forum copy.
    assert!(unique[0].content.contains("Benchmarks inside"));

    let keywords = vec!["open source".to_string(), "llm".to_string()];
    let summarizer = ExtractiveSummarizer::new(keywords, 10);
    let digest = summarizer.summarize(&unique).await.expect("summarize");

    assert_eq!(digest.stories.len(), 1);
    assert_eq!(digest.stories[0].title, "Open source LLM released");
    assert!(digest.text.contains("# Weekly Tech Digest"));
    assert!(digest.text.contains("Open source LLM released"));
}

#[tokio::test]
async fn test_summarizer_respects_story_cap() {
    init_tracing();

    let records: Vec<Record> = (0..15)
        .map(|i| {
            record(
                &format!("LLM release number {}", i),
                &format!("https://example.com/llm-{}", i),
                "rss:test",
                "Another large language model release.",
            )
        })
        .collect();

    let summarizer = ExtractiveSummarizer::new(vec!["llm".to_string()], 10);
    let digest = summarizer.summarize(&records).await.expect("summarize");
    assert_eq!(digest.stories.len(), 10);
}
