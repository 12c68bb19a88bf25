// src/core/html.rs
// DOM helpers over `scraper`. Tag and class checks go through the parsed tree
// rather than CSS selectors so that nothing here can fail at runtime.

use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;

/// All elements strictly below `root`, in document order.
pub fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Descendants of `root` with the given tag name (ASCII case-insensitive).
pub fn find_all<'a>(root: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> {
    descendant_elements(root).filter(move |e| e.value().name().eq_ignore_ascii_case(tag))
}

/// First element in the document whose `id` attribute equals `id`.
pub fn find_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    let root = doc.root_element();
    std::iter::once(root)
        .chain(descendant_elements(root))
        .find(|e| e.value().id() == Some(id))
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn has_class_prefix(el: ElementRef<'_>, prefix: &str) -> bool {
    el.value().classes().any(|c| c.starts_with(prefix))
}

pub fn contains_tag(el: ElementRef<'_>, tag: &str) -> bool {
    descendant_elements(el).any(|e| e.value().name().eq_ignore_ascii_case(tag))
}

/// Visible text of `el` as one line: all text nodes, whitespace collapsed.
pub fn inline_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    normalize_ws(&raw)
}

/// Text nodes of `el`, each trimmed, empties dropped. `<br>` and inline tags
/// both act as line breaks.
pub fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
