pub mod fetcher;
pub mod parser;
pub mod pipeline;
pub mod types;

use reqwest::Url;

use fetcher::DEFAULT_FEED_URL;

#[derive(Debug, Clone)]
pub struct FeedService {
    feed_url: String,
}

impl FeedService {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        "feed"
    }

    /// `misconfigured` when the upstream URL could never be fetched.
    pub fn status(&self) -> &'static str {
        match Url::parse(&self.feed_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => "ready",
            _ => "misconfigured",
        }
    }
}

impl Default for FeedService {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_the_configured_url() {
        assert_eq!(FeedService::default().status(), "ready");
        assert_eq!(FeedService::new("http://127.0.0.1:9/feed").status(), "ready");
        assert_eq!(FeedService::new("ftp://example.com/feed").status(), "misconfigured");
        assert_eq!(FeedService::new("not a url").status(), "misconfigured");
        assert_eq!(FeedService::new("").status(), "misconfigured");
    }
}
