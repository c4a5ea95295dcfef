use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
}

/// HTTP client for element-set feeds.
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Downloads one feed as text. Anything but HTTP 200 is an error.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let fetcher = FeedFetcher::new(Duration::from_secs(2)).unwrap();
        let result = fetcher.fetch_text("http://127.0.0.1:9/feed").await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network connection
    async fn fetches_a_live_celestrak_feed() {
        let fetcher = FeedFetcher::new(Duration::from_secs(30)).unwrap();
        let text = fetcher
            .fetch_text("https://celestrak.org/NORAD/elements/gp.php?GROUP=stations&FORMAT=tle")
            .await
            .unwrap();
        assert!(text.lines().any(|l| l.starts_with("1 ")));
    }
}
