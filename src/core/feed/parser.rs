use roxmltree::{Document, Node, ParsingOptions};

use super::types::{FeedItem, FALLBACK_DESCRIPTION, FALLBACK_LINK, FALLBACK_TITLE};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("feed payload is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}

pub fn parse_feed_bytes(raw: &[u8]) -> Result<Vec<FeedItem>, FeedParseError> {
    let text = std::str::from_utf8(raw)?;
    parse_feed(text)
}

/// Parses every `<item>` of an RSS document, in document order.
///
/// The whole batch fails on malformed XML; there is no per-item recovery.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, FeedParseError> {
    let trimmed = xml.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(trimmed, options)?;
    let items: Vec<FeedItem> = doc
        .descendants()
        .filter(|node| node.has_tag_name("item"))
        .map(item_from_node)
        .collect();

    tracing::debug!("Parsed {} items from RSS feed", items.len());
    Ok(items)
}

/// Current UTC time in the `toUTCString` shape: `Mon, 08 Sep 2025 00:00:00 GMT`.
pub fn current_rfc2822_timestamp() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

fn item_from_node(item: Node<'_, '_>) -> FeedItem {
    FeedItem {
        title: child_text(item, "title").unwrap_or_else(|| FALLBACK_TITLE.to_string()),
        link: child_text(item, "link").unwrap_or_else(|| FALLBACK_LINK.to_string()),
        publish_date: child_text(item, "pubDate").unwrap_or_else(current_rfc2822_timestamp),
        raw_description_html: child_text(item, "description")
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
    }
}

// Empty text counts as missing, so the caller's fallback applies.
fn child_text(item: Node<'_, '_>, name: &str) -> Option<String> {
    let child = item
        .children()
        .find(|child| child.is_element() && child.has_tag_name(name))?;
    let text: String = child
        .descendants()
        .filter(Node::is_text)
        .filter_map(|node| node.text())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
