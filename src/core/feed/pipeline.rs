use super::fetcher::{fetch_feed, FetchError};
use super::parser::{parse_feed_bytes, FeedParseError};
use super::types::{FeedItem, ProcessedFeedItem};
use crate::core::content::{plain_text_snippet, process_with_title};

/// Either half of the pipeline failing; callers are expected to treat both alike.
#[derive(Debug, thiserror::Error)]
pub enum FeedLoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
}

/// Fetch → parse → sanitize, one request per call, nothing cached.
pub async fn load_feed_items(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<ProcessedFeedItem>, FeedLoadError> {
    let fetched = fetch_feed(client, url).await?;
    let items = parse_feed_bytes(&fetched.body)?;
    Ok(process_items(items))
}

pub fn process_items(items: Vec<FeedItem>) -> Vec<ProcessedFeedItem> {
    items.into_iter().map(process_item).collect()
}

pub fn process_item(item: FeedItem) -> ProcessedFeedItem {
    let (content, metadata) = process_with_title(item.raw_description_html.as_str(), &item.title);
    let snippet = plain_text_snippet(&content);
    let display_date = item.display_date();

    ProcessedFeedItem {
        title: item.title,
        link: item.link,
        publish_date: item.publish_date,
        display_date,
        content,
        snippet,
        metadata,
    }
}
