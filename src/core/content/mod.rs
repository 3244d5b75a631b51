//! Description HTML → display-safe fragment plus the metadata it carried.

pub mod metadata;
pub mod rules;
pub mod sanitizer;

use std::fmt;

use scraper::Html;
use serde::{Deserialize, Serialize};

pub use metadata::{ExtractedMetadata, FeedDate, FeedTag};

const SNIPPET_MAX_CHARS: usize = 240;
const SNIPPET_WRAP_WIDTH: usize = 1_000;
const SELF_CHECK_INPUT: &str = "<p>ok<script>alert(1)</script></p>";

#[derive(Debug, Clone, Default)]
pub struct ContentService;

impl ContentService {
    pub fn name(&self) -> &'static str {
        "content"
    }

    /// Runs a known hostile fragment through the pipeline; `degraded` if it leaks.
    pub fn status(&self) -> &'static str {
        let (content, _) = process(SELF_CHECK_INPUT);
        let output = content.as_str().to_ascii_lowercase();
        if output.contains("ok") && !output.contains("script") && !output.contains("alert") {
            "ready"
        } else {
            "degraded"
        }
    }
}

/// HTML restricted to the allow-listed tag and attribute set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SanitizedContent(String);

impl SanitizedContent {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sanitizes a description and extracts its metadata.
///
/// Total over all inputs: `None`, empty and malformed HTML all succeed.
pub fn process<'a>(raw_html: impl Into<Option<&'a str>>) -> (SanitizedContent, ExtractedMetadata) {
    process_inner(raw_html.into(), None)
}

/// Like [`process`], additionally dropping any heading that repeats `title`.
pub fn process_with_title<'a>(
    raw_html: impl Into<Option<&'a str>>,
    title: &str,
) -> (SanitizedContent, ExtractedMetadata) {
    process_inner(raw_html.into(), Some(title))
}

fn process_inner(raw_html: Option<&str>, title: Option<&str>) -> (SanitizedContent, ExtractedMetadata) {
    let Some(raw_html) = raw_html.filter(|raw| !raw.trim().is_empty()) else {
        return (SanitizedContent::default(), ExtractedMetadata::default());
    };

    let stripped = sanitizer::strip_scripts(raw_html);
    let document = Html::parse_fragment(&stripped);
    let metadata = metadata::extract(&document);
    let content = SanitizedContent(sanitizer::sanitize(&document, title));
    (content, metadata)
}

/// Single-line plain text preview of sanitized content.
pub fn plain_text_snippet(content: &SanitizedContent) -> String {
    if content.is_empty() {
        return String::new();
    }
    let decorator = html2text::render::text_renderer::TrivialDecorator::new();
    let text = html2text::from_read_with_decorator(
        content.as_str().as_bytes(),
        SNIPPET_WRAP_WIDTH,
        decorator,
    );
    let text = rules::normalize_whitespace(&text);
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        return text;
    }
    let mut truncated: String = text.chars().take(SNIPPET_MAX_CHARS).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}
