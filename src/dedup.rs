//! Two-phase deduplication: exact identity via URL canonicalization, then
//! approximate identity via fuzzy title matching.

use crate::types::Record;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use url::form_urlencoded;
use url::Url;

/// Query parameters commonly used for tracking, stripped during
/// canonicalization. Matched case-insensitively.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content",
    "ref", "source", "fbclid", "gclid", "mc_cid", "mc_eid",
];

/// Titles at or above this token-sort similarity are treated as the same
/// item.
pub const FUZZY_TITLE_THRESHOLD: u32 = 80;

/// Canonicalize a URL: lowercase scheme and host, strip a leading "www.",
/// drop tracking parameters and the fragment, trim trailing slashes from the
/// path. Unparseable input falls back to a lowercase, slash-trimmed form.
/// Idempotent.
pub fn normalize_url(raw: &str) -> String {
    let parsed = match Url::parse(raw) {
        Ok(u) if u.host_str().is_some() => u,
        _ => return raw.to_lowercase().trim_end_matches('/').to_string(),
    };

    let scheme = parsed.scheme().to_ascii_lowercase();
    let host = parsed.host_str().unwrap_or("").to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let path = parsed.path().trim_end_matches('/');

    let mut kept = form_urlencoded::Serializer::new(String::new());
    let mut has_query = false;
    for (key, value) in parsed.query_pairs() {
        if TRACKING_PARAMS.contains(&key.to_ascii_lowercase().as_str()) {
            continue;
        }
        kept.append_pair(&key, &value);
        has_query = true;
    }

    let mut normalized = format!("{}://{}", scheme, host);
    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized.push_str(path);
    if has_query {
        normalized.push('?');
        normalized.push_str(&kept.finish());
    }
    normalized
}

fn sorted_tokens(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Order-independent lexical similarity between two strings, 0-100: both are
/// reduced to sorted token sequences and compared by normalized edit
/// distance.
pub fn token_sort_ratio(a: &str, b: &str) -> u32 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    (strsim::normalized_levenshtein(&a, &b) * 100.0).round() as u32
}

/// Collapse records describing the same item into canonical records.
///
/// Phase 1 groups by normalized URL (first-appearance order) and merges each
/// group. Phase 2 walks the merged list in order, opening a cluster at each
/// unassigned record and folding in every later unassigned record whose title
/// matches the cluster seed at or above the threshold. Clustering is greedy
/// single-link against the seed only, not transitive closure: with A~B, B~C,
/// A!~C the outcome depends on which record seeds first. That tie-break is
/// part of the contract.
pub fn deduplicate(records: Vec<Record>) -> Vec<Record> {
    deduplicate_with_threshold(records, FUZZY_TITLE_THRESHOLD)
}

pub fn deduplicate_with_threshold(records: Vec<Record>, threshold: u32) -> Vec<Record> {
    if records.is_empty() {
        return records;
    }

    // Phase 1: group by normalized URL, preserving first-appearance order.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Record>> = Vec::new();
    for record in records {
        let key = normalize_url(&record.url);
        match index.get(&key) {
            Some(&i) => groups[i].push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![record]);
            }
        }
    }
    let merged: Vec<Record> = groups.into_iter().map(merge_group).collect();

    // Phase 2: greedy fuzzy-title clustering over the merged list.
    let mut used = vec![false; merged.len()];
    let mut canonical = Vec::new();
    for i in 0..merged.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut cluster = vec![merged[i].clone()];
        for j in (i + 1)..merged.len() {
            if used[j] {
                continue;
            }
            let similarity = token_sort_ratio(&merged[i].title, &merged[j].title);
            if similarity >= threshold {
                debug!(
                    "Fuzzy match ({}): '{}' ~ '{}'",
                    similarity, merged[i].title, merged[j].title
                );
                used[j] = true;
                cluster.push(merged[j].clone());
            }
        }
        canonical.push(merge_group(cluster));
    }

    canonical
}

/// Merge a cluster of duplicates into one record: the member with the longest
/// content (first on ties) donates title, url, source, published_at, and
/// content; tags are the union of all members; score is the highest defined
/// score.
fn merge_group(mut group: Vec<Record>) -> Record {
    if group.len() == 1 {
        return group.remove(0);
    }

    let mut best = 0;
    for (i, record) in group.iter().enumerate() {
        if record.content.len() > group[best].content.len() {
            best = i;
        }
    }

    let tags: BTreeSet<String> = group.iter().flat_map(|r| r.tags.iter().cloned()).collect();
    let score = group.iter().filter_map(|r| r.score).max();
    let winner = group.swap_remove(best);

    Record {
        title: winner.title,
        url: winner.url,
        source: winner.source,
        content: winner.content,
        published_at: winner.published_at,
        score,
        tags: tags.into_iter().collect(),
    }
}
