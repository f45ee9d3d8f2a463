use crate::types::{Record, Result};
use crate::utils::smart_truncate;
use async_trait::async_trait;
use tracing::info;

const EXCERPT_LEN: usize = 300;
const MIN_RELEVANCE: f64 = 0.1;

/// Boundary with the summarization stage. The pipeline hands the canonical
/// record sequence to an implementation of this trait; an LLM-backed
/// summarizer slots in behind the same seam.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, records: &[Record]) -> Result<Digest>;
}

#[derive(Debug, Clone)]
pub struct Digest {
    pub stories: Vec<SelectedStory>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SelectedStory {
    pub title: String,
    pub url: String,
    pub source: String,
}

/// Deterministic local summarizer: scores records against the keyword list,
/// keeps the top stories, and composes a markdown digest with a bounded
/// excerpt per story.
pub struct ExtractiveSummarizer {
    keywords: Vec<String>,
    max_stories: usize,
}

impl ExtractiveSummarizer {
    pub fn new(keywords: Vec<String>, max_stories: usize) -> Self {
        Self {
            keywords,
            max_stories,
        }
    }

    fn score_record(&self, record: &Record) -> f64 {
        let title = record.title.to_lowercase();
        let content = record.content.to_lowercase();

        let mut score: f64 = 0.0;
        for keyword in &self.keywords {
            if title.contains(keyword.as_str()) {
                score += 0.3;
            }
            if content.contains(keyword.as_str()) {
                score += 0.1;
            }
        }
        let score = score.min(1.0);

        // Popularity breaks ties between equally relevant stories.
        score + (record.score.unwrap_or(0).max(0) as f64).ln_1p() * 0.01
    }

    fn compose(&self, selected: &[&Record]) -> String {
        if selected.is_empty() {
            return "No relevant stories collected this week.\n".to_string();
        }

        let mut text = String::from("# Weekly Tech Digest\n\n");
        for (i, record) in selected.iter().enumerate() {
            text.push_str(&format!("## {}. {}\n\n", i + 1, record.title));
            text.push_str(&format!("*{}* — <{}>\n\n", record.source, record.url));
            let excerpt = smart_truncate(&record.content, EXCERPT_LEN);
            if !excerpt.is_empty() {
                text.push_str(&excerpt);
                text.push_str("\n\n");
            }
        }
        text
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, records: &[Record]) -> Result<Digest> {
        let mut scored: Vec<(f64, &Record)> = records
            .iter()
            .map(|record| (self.score_record(record), record))
            .collect();

        // Stable sort keeps canonical order for equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let selected: Vec<&Record> = scored
            .iter()
            .filter(|(score, _)| *score > MIN_RELEVANCE)
            .take(self.max_stories)
            .map(|(_, record)| *record)
            .collect();

        info!(
            "Selected {} of {} records for the digest",
            selected.len(),
            records.len()
        );

        let text = self.compose(&selected);
        let stories = selected
            .iter()
            .map(|record| SelectedStory {
                title: record.title.clone(),
                url: record.url.clone(),
                source: record.source.clone(),
            })
            .collect();

        Ok(Digest { stories, text })
    }
}
