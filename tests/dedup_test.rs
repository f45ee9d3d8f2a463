use tech_digest::{deduplicate, normalize_url, token_sort_ratio, Record};

fn record(title: &str, url: &str, source: &str, content: &str, tags: &[&str]) -> Record {
    Record {
        title: title.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        content: content.to_string(),
        published_at: None,
        score: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let samples = [
        "https://www.example.com/page/",
        "https://example.com/page?utm_source=twitter&id=7",
        "HTTPS://Example.COM/Path/To/Page/",
        "https://example.com:8080/page?b=2&a=1",
        "https://example.com/page#section",
        "not a url at all/",
        "https://example.com",
    ];
    for sample in samples {
        let once = normalize_url(sample);
        let twice = normalize_url(&once);
        assert_eq!(once, twice, "normalization not idempotent for {}", sample);
    }
}

#[test]
fn test_normalization_equivalences() {
    assert_eq!(
        normalize_url("https://www.example.com/page/"),
        normalize_url("https://example.com/page")
    );
    assert_eq!(
        normalize_url("https://example.com/page?utm_source=x"),
        normalize_url("https://example.com/page")
    );
    assert_eq!(
        normalize_url("https://example.com/page?UTM_Campaign=y&fbclid=z&ref=hn"),
        normalize_url("https://example.com/page")
    );
    // Non-tracking parameters survive.
    assert_eq!(
        normalize_url("https://example.com/page?id=7&utm_medium=rss"),
        "https://example.com/page?id=7"
    );
    // Fragments are dropped.
    assert_eq!(
        normalize_url("https://example.com/page#comments"),
        "https://example.com/page"
    );
}

#[test]
fn test_phase1_merge_keeps_longest_content_and_unions_tags() {
    let articles = vec![
        record("Article A", "https://example.com/page", "rss:a", "12345", &["ai"]),
        record(
            "Article A copy",
            "https://www.example.com/page/",
            "hackernews",
            "1234567890123456789012345678901234567890",
            &["ml"],
        ),
    ];
    let result = deduplicate(articles);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].content.len(), 40);
    assert_eq!(result[0].tags, vec!["ai".to_string(), "ml".to_string()]);
}

#[test]
fn test_phase2_merges_fuzzy_titles() {
    let similarity = token_sort_ratio("Google Releases Gemini 2.5", "Google Releases Gemini 2.5 Ultra");
    assert!(similarity >= 80, "expected >= 80, got {}", similarity);

    let articles = vec![
        record(
            "Google Releases Gemini 2.5",
            "https://a.com/1",
            "rss:a",
            "Content A",
            &[],
        ),
        record(
            "Google Releases Gemini 2.5 Ultra",
            "https://b.com/2",
            "hackernews",
            "Content B is longer than A",
            &[],
        ),
    ];
    let result = deduplicate(articles);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].content, "Content B is longer than A");
}

#[test]
fn test_keeps_distinct_articles() {
    let similarity = token_sort_ratio(
        "AI breakthrough in protein folding",
        "New JavaScript framework released",
    );
    assert!(similarity < 80, "expected < 80, got {}", similarity);

    let articles = vec![
        record(
            "AI breakthrough in protein folding",
            "https://a.com/1",
            "rss:a",
            "A",
            &[],
        ),
        record(
            "New JavaScript framework released",
            "https://b.com/2",
            "hackernews",
            "B",
            &[],
        ),
    ];
    let result = deduplicate(articles);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_merge_keeps_highest_score() {
    let mut a = record("Same Story", "https://a.com/1", "hackernews", "short", &[]);
    a.score = Some(120);
    let mut b = record("Same Story", "https://b.com/2", "reddit:r/tech", "much longer content", &[]);
    b.score = Some(80);

    let result = deduplicate(vec![a, b]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].score, Some(120));
    assert_eq!(result[0].content, "much longer content");
}

#[test]
fn test_merge_ties_keep_first_occurrence() {
    let a = record("Same Story", "https://a.com/1", "rss:a", "12345", &[]);
    let b = record("Same Story", "https://b.com/2", "hackernews", "abcde", &[]);

    let result = deduplicate(vec![a, b]);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].url, "https://a.com/1");
    assert_eq!(result[0].source, "rss:a");
}

#[test]
fn test_empty_input() {
    assert!(deduplicate(Vec::new()).is_empty());
}

#[test]
fn test_end_to_end_scenario() {
    let articles = vec![
        record("Same Article", "https://example.com/page", "rss:a", "1234567", &["ai"]),
        record(
            "Same Article",
            "https://www.example.com/page/",
            "hackernews",
            "123456789012345678901234567890",
            &["ml", "research"],
        ),
        record(
            "Totally Unrelated Topic",
            "https://other.com/x",
            "arxiv",
            "abstract text",
            &[],
        ),
    ];

    let result = deduplicate(articles);
    assert_eq!(result.len(), 2);

    assert_eq!(result[0].content.len(), 30);
    assert_eq!(
        result[0].tags,
        vec!["ai".to_string(), "ml".to_string(), "research".to_string()]
    );

    assert_eq!(result[1].title, "Totally Unrelated Topic");
    assert_eq!(result[1].url, "https://other.com/x");
    assert_eq!(result[1].content, "abstract text");
}

#[test]
fn test_token_sort_ratio_is_order_independent() {
    assert_eq!(token_sort_ratio("gemini google releases", "releases google gemini"), 100);
    assert_eq!(token_sort_ratio("", ""), 100);
    assert_eq!(token_sort_ratio("Hello World", "hello  world!"), 100);
}

#[test]
fn test_singleton_cluster_passes_through_unchanged() {
    let mut a = record("Only One", "https://a.com/1", "rss:a", "body", &["x"]);
    a.score = Some(5);
    let result = deduplicate(vec![a.clone()]);
    assert_eq!(result, vec![a]);
}
