use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::content::{ExtractedMetadata, SanitizedContent};

pub const FALLBACK_TITLE: &str = "No Title";
pub const FALLBACK_LINK: &str = "#";
pub const FALLBACK_DESCRIPTION: &str = "No Description";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// One `<item>` of the upstream feed, exactly as the XML carried it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub publish_date: String,
    pub raw_description_html: String,
}

impl FeedItem {
    /// Long en-US form of the publish date, e.g. `September 8, 2025`.
    pub fn display_date(&self) -> String {
        format_display_date(&self.publish_date)
    }
}

/// A feed item after its description went through the content pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedFeedItem {
    pub title: String,
    pub link: String,
    pub publish_date: String,
    pub display_date: String,
    pub content: SanitizedContent,
    pub snippet: String,
    pub metadata: ExtractedMetadata,
}

pub fn format_display_date(raw: &str) -> String {
    parse_publish_date(raw)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

fn parse_publish_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_date_accepts_rfc2822_and_rfc3339() {
        assert_eq!(
            format_display_date("Mon, 08 Sep 2025 00:00:00 GMT"),
            "September 8, 2025"
        );
        assert_eq!(
            format_display_date("2025-09-09T12:30:00-07:00"),
            "September 9, 2025"
        );
    }

    #[test]
    fn display_date_falls_back_for_garbage() {
        assert_eq!(format_display_date("not a date"), UNKNOWN_DATE);
        assert_eq!(format_display_date("   "), UNKNOWN_DATE);
    }

    #[test]
    fn feed_item_serializes_with_camel_case_keys() {
        let item = FeedItem {
            title: "T".to_string(),
            link: "http://x/1".to_string(),
            publish_date: "Mon, 08 Sep 2025 00:00:00 GMT".to_string(),
            raw_description_html: "<p>Body</p>".to_string(),
        };
        let value = serde_json::to_value(&item).expect("item must serialize");
        assert_eq!(value["publishDate"], "Mon, 08 Sep 2025 00:00:00 GMT");
        assert_eq!(value["rawDescriptionHtml"], "<p>Body</p>");
    }
}
