//! Tree-pattern predicates and the allow-list tables shared by extraction and
//! sanitization. Matching is on tag name plus class/attribute predicates only.

use scraper::ElementRef;

/// Classes marking a whole container as the tag list block.
pub const TAG_LIST_CLASSES: &[&str] = &["field--name-field-tags", "field-tags", "tags", "tag-list"];

/// Path segment of taxonomy term links.
pub const TAXONOMY_PATH: &str = "/taxonomy/term/";

/// Removed together with everything inside them, whatever the allow-list says.
pub const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "noscript", "template",
];

pub const ALLOWED_TAGS: &[&str] = &[
    // headings
    "h1", "h2", "h3", "h4", "h5", "h6",
    // lists
    "ul", "ol", "li", "dl", "dt", "dd",
    // media
    "img", "figure", "figcaption",
    // baseline
    "a", "abbr", "b", "blockquote", "br", "cite", "code", "del", "div", "em", "hr", "i", "ins",
    "mark", "p", "pre", "q", "s", "small", "span", "strong", "sub", "sup", "u",
    "table", "thead", "tbody", "tfoot", "tr", "th", "td", "caption",
];

pub const GENERIC_ATTRIBUTES: &[&str] = &["class", "id", "style"];
pub const ANCHOR_ATTRIBUTES: &[&str] = &["href", "name", "target", "rel", "title"];
pub const IMAGE_ATTRIBUTES: &[&str] = &["src", "alt", "title", "width", "height"];

pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub const TITLE_HEADING_CLASS: &str = "text-2xl font-bold mb-4";
pub const UNORDERED_LIST_CLASS: &str = "list-disc pl-6 mb-4";
pub const ORDERED_LIST_CLASS: &str = "list-decimal pl-6 mb-4";
pub const LIST_ITEM_CLASS: &str = "mb-1";
pub const PARAGRAPH_CLASS: &str = "mb-4";
pub const ANCHOR_CLASS: &str = "text-asu-maroon hover:underline";
pub const ANCHOR_TARGET: &str = "_blank";
pub const ANCHOR_REL: &str = "noopener noreferrer";

fn is_named(element: ElementRef<'_>, name: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(name)
}

pub fn is_tag_class(class: &str) -> bool {
    class == "tag" || class.ends_with("-tag")
}

pub fn has_tag_class(element: ElementRef<'_>) -> bool {
    element.value().classes().any(is_tag_class)
}

pub fn is_tag_list_container(element: ElementRef<'_>) -> bool {
    element
        .value()
        .classes()
        .any(|class| TAG_LIST_CLASSES.contains(&class))
}

pub fn is_taxonomy_anchor(element: ElementRef<'_>) -> bool {
    is_named(element, "a")
        && element
            .value()
            .attr("href")
            .is_some_and(|href| href.contains(TAXONOMY_PATH))
}

/// An anchor carrying a tag class or pointing at a taxonomy term.
pub fn is_tag_anchor(element: ElementRef<'_>) -> bool {
    is_named(element, "a") && (has_tag_class(element) || is_taxonomy_anchor(element))
}

/// The inner half of the `<span><span>Author</span></span>` nesting.
pub fn is_author_span(element: ElementRef<'_>) -> bool {
    is_named(element, "span")
        && element
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| is_named(parent, "span"))
}

pub fn is_time(element: ElementRef<'_>) -> bool {
    is_named(element, "time")
}

pub fn is_heading(element: ElementRef<'_>) -> bool {
    matches!(
        element.value().name().to_ascii_lowercase().as_str(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

pub fn is_dropped_with_content(element: ElementRef<'_>) -> bool {
    DROPPED_WITH_CONTENT
        .iter()
        .any(|name| is_named(element, name))
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// A heading whose text repeats the item title.
pub fn is_title_heading(element: ElementRef<'_>, title: &str) -> bool {
    let title = normalize_whitespace(title);
    !title.is_empty() && is_heading(element) && element_text(element) == title
}
