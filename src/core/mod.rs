pub mod content;
pub mod feed;

use std::collections::BTreeMap;

use content::ContentService;
use feed::FeedService;

#[derive(Debug, Clone, Default)]
pub struct AppServices {
    feed: FeedService,
    content: ContentService,
}

impl AppServices {
    pub fn new(feed_url: &str) -> Self {
        Self {
            feed: FeedService::new(feed_url),
            content: ContentService,
        }
    }

    pub fn health_report(&self) -> BTreeMap<String, String> {
        let mut report = BTreeMap::new();
        report.insert(self.feed.name().to_string(), self.feed.status().to_string());
        report.insert(
            self.content.name().to_string(),
            self.content.status().to_string(),
        );
        report
    }
}
