use crate::config::FetchConfig;
use crate::types::{PipelineError, Result};
use crate::utils::{extract_text_from_html, looks_like_html, truncate_chars};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Shared HTTP helper used by every collector.
///
/// `get_text`/`get_json` are single-attempt and propagate errors so callers
/// can decide whether a failure means "skip this item" or "skip this source".
/// `fetch_page` is the bounded-retry page-content path: it degrades to an
/// empty string on exhaustion instead of failing.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.get_text_with_headers(url, &[]).await
    }

    pub async fn get_text_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_headers(url, &[]).await
    }

    pub async fn get_json_with_headers<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch auxiliary page content for a record.
    ///
    /// Retries transient failures up to `max_retries` additional attempts
    /// with exponential backoff, then gives up and returns an empty string.
    /// HTML bodies are reduced to plain text; anything else passes through
    /// raw. Output is capped at `max_content_len`.
    pub async fn fetch_page(&self, url: &str) -> String {
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 16),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut last_error: Option<PipelineError> = None;

        for attempt in 0..=self.config.max_retries {
            match self.get_text(url).await {
                Ok(body) => {
                    let text = if looks_like_html(&body) {
                        extract_text_from_html(&body)
                    } else {
                        body
                    };
                    return truncate_chars(&text, self.config.max_content_len);
                }
                Err(e) => {
                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!(
                                "Attempt {} failed for {}: {}, retrying in {:?}",
                                attempt + 1,
                                url,
                                e,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                            last_error = Some(e);
                            continue;
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            debug!(
                "Giving up on {} after {} attempts: {}",
                url,
                self.config.max_retries + 1,
                e
            );
        }
        String::new()
    }
}
