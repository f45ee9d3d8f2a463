//! Immutable run configuration: source lists, thresholds, HTTP knobs.
//!
//! Everything here is plain data handed to the orchestrator and collectors at
//! construction time, so tests can substitute their own lists.

/// One named feed endpoint.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("techcrunch", "https://techcrunch.com/feed/"),
    ("theverge", "https://www.theverge.com/rss/index.xml"),
    ("arstechnica", "https://feeds.arstechnica.com/arstechnica/technology-lab"),
    ("google-ai", "https://blog.google/technology/ai/rss/"),
    ("openai", "https://openai.com/blog/rss.xml"),
    ("anthropic", "https://www.anthropic.com/rss.xml"),
    ("huggingface", "https://huggingface.co/blog/feed.xml"),
    ("simonwillison", "https://simonwillison.net/atom/everything/"),
    ("lilianweng", "https://lilianweng.github.io/index.xml"),
    ("mlengineer", "https://newsletter.mlengineer.io/feed"),
];

const DEFAULT_SUBREDDITS: &[&str] = &[
    "MachineLearning",
    "artificial",
    "LocalLLaMA",
    "technology",
    "programming",
];

const DEFAULT_ARXIV_CATEGORIES: &[&str] = &["cs.AI", "cs.LG", "cs.CL", "cs.CV"];

const DEFAULT_GITHUB_TOPICS: &[&str] = &[
    "machine-learning",
    "deep-learning",
    "artificial-intelligence",
    "llm",
    "large-language-model",
    "generative-ai",
    "nlp",
    "computer-vision",
    "transformers",
];

/// Keyword list used for relevance filtering (case-insensitive substring
/// match against title + URL) and for digest story scoring.
const DEFAULT_KEYWORDS: &[&str] = &[
    "ai", "artificial intelligence", "machine learning", "deep learning",
    "neural network", "llm", "large language model", "gpt", "gemini",
    "claude", "transformer", "diffusion", "generative", "nlp",
    "computer vision", "robotics", "autonomous", "openai", "anthropic",
    "google ai", "meta ai", "mistral", "llama", "open source",
    "gpu", "cuda", "pytorch", "tensorflow", "hugging face",
    "fine-tuning", "rlhf", "rag", "vector database", "embedding",
    "agent", "copilot", "automation", "semiconductor", "chip",
];

/// HTTP fetch behavior shared by every collector through the [`Fetcher`].
///
/// [`Fetcher`]: crate::fetcher::Fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Additional attempts after the first, for page-content fetches.
    pub max_retries: u32,
    /// Base backoff delay; doubles on each retry.
    pub retry_delay_seconds: u64,
    /// Cap on fetched page content, in characters.
    pub max_content_len: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "tech-digest-bot/1.0 (https://github.com/tech-digest)".to_string(),
            timeout_seconds: 15,
            max_retries: 2,
            retry_delay_seconds: 1,
            max_content_len: 50_000,
            max_redirects: 5,
        }
    }
}

/// Full pipeline configuration. `Default` carries the stock source lists and
/// thresholds; callers override fields as needed.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub feeds: Vec<FeedSpec>,
    pub subreddits: Vec<String>,
    pub arxiv_categories: Vec<String>,
    pub arxiv_max_results: usize,
    pub github_topics: Vec<String>,
    pub github_min_stars: u32,
    pub github_max_repos: usize,
    pub github_token: Option<String>,
    pub keywords: Vec<String>,
    pub hn_min_score: i64,
    pub hn_max_stories: usize,
    /// IDs taken from the head of each ranked list before the set union.
    pub hn_list_take: usize,
    /// Hard cap on simultaneously in-flight item fetches.
    pub hn_concurrency: usize,
    pub reddit_min_score: i64,
    pub reddit_max_comments: usize,
    /// Rolling collection window: items older than this are dropped when the
    /// source provides a timestamp.
    pub window_days: i64,
    /// Token-sort similarity (0-100) at which two titles count as the same
    /// item.
    pub fuzzy_title_threshold: u32,
    /// Stories the summarizer keeps in the final digest.
    pub max_stories: usize,
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS
                .iter()
                .map(|(name, url)| FeedSpec::new(name, url))
                .collect(),
            subreddits: DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            arxiv_categories: DEFAULT_ARXIV_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            arxiv_max_results: 30,
            github_topics: DEFAULT_GITHUB_TOPICS.iter().map(|s| s.to_string()).collect(),
            github_min_stars: 50,
            github_max_repos: 30,
            github_token: None,
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            hn_min_score: 50,
            hn_max_stories: 30,
            hn_list_take: 50,
            hn_concurrency: 10,
            reddit_min_score: 100,
            reddit_max_comments: 5,
            window_days: 7,
            fuzzy_title_threshold: crate::dedup::FUZZY_TITLE_THRESHOLD,
            max_stories: 10,
            fetch: FetchConfig::default(),
        }
    }
}
