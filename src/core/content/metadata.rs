use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use super::rules;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedMetadata {
    pub author: Option<String>,
    pub dates: Vec<FeedDate>,
    pub tags: Vec<FeedTag>,
}

impl ExtractedMetadata {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.dates.is_empty() && self.tags.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedDate {
    pub datetime: Option<String>,
    pub display_text: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedTag {
    pub text: String,
    pub link: String,
}

/// First nested span with non-empty text; the one the author is read from.
pub fn author_span(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| rules::is_author_span(*element))
        .find(|element| !rules::element_text(*element).is_empty())
}

/// Reads author, dates and tags off the parsed description.
///
/// Must run before any structural removal: the markers read here are the
/// ones the sanitizer deletes afterwards.
pub fn extract(document: &Html) -> ExtractedMetadata {
    let elements = || document.root_element().descendants().filter_map(ElementRef::wrap);

    let author = author_span(document).map(rules::element_text);

    let dates = elements()
        .filter(|element| rules::is_time(*element))
        .map(|element| FeedDate {
            datetime: element.value().attr("datetime").map(ToString::to_string),
            display_text: rules::element_text(element),
            title: element.value().attr("title").unwrap_or_default().to_string(),
        })
        .collect();

    let tags = elements()
        .filter(|element| rules::is_tag_anchor(*element))
        .map(|element| FeedTag {
            text: rules::element_text(element),
            link: element.value().attr("href").unwrap_or_default().to_string(),
        })
        .collect();

    ExtractedMetadata {
        author,
        dates,
        tags,
    }
}
