use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

pub const DEFAULT_FEED_URL: &str = "https://ai.asu.edu/taxonomy/term/1/feed";
pub const FEED_USER_AGENT: &str = "Mozilla/5.0";
pub const FEED_ACCEPT: &str = "application/rss+xml, application/xml, text/xml";

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

/// Single GET against the upstream feed. No retries; any failure is final.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    tracing::debug!("Fetching RSS feed from: {}", url);

    let response = client
        .get(url)
        .header(USER_AGENT, FEED_USER_AGENT)
        .header(ACCEPT, FEED_ACCEPT)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = response.bytes().await?.to_vec();

    tracing::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(FetchedFeed { body, content_type })
}
