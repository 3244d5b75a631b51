use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use super::{metadata, rules};

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script block pattern is valid")
});

static UNTERMINATED_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*$").expect("script opener pattern is valid"));

static ALLOW_LIST: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::default();
    builder
        .tags(rules::ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(rules::DROPPED_WITH_CONTENT.iter().copied().collect())
        .generic_attributes(rules::GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(HashMap::from([
            ("a", rules::ANCHOR_ATTRIBUTES.iter().copied().collect::<HashSet<_>>()),
            ("img", rules::IMAGE_ATTRIBUTES.iter().copied().collect::<HashSet<_>>()),
        ]))
        .link_rel(None)
        .strip_comments(true);
    builder
});

/// Textual pass: cuts `<script>` regions out before anything parses the markup.
///
/// Repeats until stable so that split openers such as `<scr<script></script>ipt>`
/// cannot reassemble into a live tag.
pub fn strip_scripts(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let stripped = SCRIPT_BLOCK.replace_all(&current, "").into_owned();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    UNTERMINATED_SCRIPT.replace_all(&current, "").into_owned()
}

/// Structural pass: applies the removal and rewrite rules to the parsed tree,
/// then runs the result through the allow-list.
pub fn sanitize(document: &Html, title: Option<&str>) -> String {
    let exclusions = Exclusions {
        title,
        author: metadata::author_span(document),
    };
    let mut rendered = String::new();
    render_children(document.root_element(), &exclusions, &mut rendered);
    ALLOW_LIST.clean(&rendered).to_string().trim().to_string()
}

struct Exclusions<'a> {
    title: Option<&'a str>,
    author: Option<ElementRef<'a>>,
}

impl Exclusions<'_> {
    fn excludes(&self, element: ElementRef<'_>) -> bool {
        rules::is_dropped_with_content(element)
            || self
                .title
                .is_some_and(|title| rules::is_title_heading(element, title))
            || rules::is_tag_list_container(element)
            || rules::is_tag_anchor(element)
            || rules::has_tag_class(element)
            || rules::is_time(element)
            || self.is_author_marker(element)
    }

    // Only the nesting the author was read from; other nested spans are content.
    fn is_author_marker(&self, element: ElementRef<'_>) -> bool {
        let Some(author) = self.author else {
            return false;
        };
        author.id() == element.id()
            || author
                .parent()
                .is_some_and(|wrapper| wrapper.id() == element.id())
    }
}

fn render_children(parent: ElementRef<'_>, exclusions: &Exclusions<'_>, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&encode_text(&**text)),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    if !exclusions.excludes(element) {
                        render_element(element, exclusions, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn render_element(element: ElementRef<'_>, exclusions: &Exclusions<'_>, out: &mut String) {
    let source_name = element.value().name().to_ascii_lowercase();
    let mut attributes: Vec<(String, String)> = element
        .value()
        .attrs()
        .filter(|(name, _)| is_plain_attribute_name(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let name = match source_name.as_str() {
        "h1" => {
            set_attribute(&mut attributes, "class", rules::TITLE_HEADING_CLASS);
            "h2"
        }
        "ul" => {
            set_attribute(&mut attributes, "class", rules::UNORDERED_LIST_CLASS);
            "ul"
        }
        "ol" => {
            set_attribute(&mut attributes, "class", rules::ORDERED_LIST_CLASS);
            "ol"
        }
        "li" => {
            set_attribute(&mut attributes, "class", rules::LIST_ITEM_CLASS);
            "li"
        }
        "p" => {
            set_attribute(&mut attributes, "class", rules::PARAGRAPH_CLASS);
            "p"
        }
        "a" => {
            set_attribute(&mut attributes, "class", rules::ANCHOR_CLASS);
            set_attribute(&mut attributes, "target", rules::ANCHOR_TARGET);
            set_attribute(&mut attributes, "rel", rules::ANCHOR_REL);
            "a"
        }
        other => other,
    };

    out.push('<');
    out.push_str(name);
    for (attribute, value) in &attributes {
        out.push(' ');
        out.push_str(attribute);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if rules::VOID_ELEMENTS.contains(&name) {
        return;
    }

    render_children(element, exclusions, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

// Replaces in place so a second pass sees the same attribute order.
fn set_attribute(attributes: &mut Vec<(String, String)>, name: &str, value: &str) {
    match attributes.iter_mut().find(|(existing, _)| existing == name) {
        Some((_, existing_value)) => *existing_value = value.to_string(),
        None => attributes.push((name.to_string(), value.to_string())),
    }
}

fn is_plain_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
