//! Profile page text extraction.
//!
//! Turns an HTML document into a single line of readable text:
//! script/style content is dropped, external links keep their target inline
//! as `text (url)`, and whitespace is collapsed so the result has no line
//! breaks and no run of two or more spaces.

use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Elements whose content never reaches the model.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line in the raw text before collapsing.
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "nav", "main", "aside", "h1", "h2",
    "h3", "h4", "h5", "h6", "li", "ul", "ol", "tr", "td", "th", "br", "hr", "table",
    "blockquote", "pre",
];

/// Extract normalized text from an HTML document.
pub fn extract_profile_text(html: &str) -> String {
    collapse_whitespace(&html_to_text(html))
}

/// Render the document's visible text, with links rewritten.
///
/// The result still carries the document's own line structure; pass it
/// through [`collapse_whitespace`] before use.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::with_capacity(html.len() / 2);
    push_element(document.root_element(), &mut out);
    out
}

fn push_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }

    if name == "a" {
        if let Some(href) = element.value().attr("href") {
            push_link(element, href.trim(), out);
            return;
        }
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_element(child_element, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push('\n');
    }
}

fn push_link(link: ElementRef<'_>, href: &str, out: &mut String) {
    let mut inner = String::new();
    for child in link.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            push_element(child_element, &mut inner);
        } else if let Node::Text(text) = child.value() {
            inner.push_str(text);
        }
    }
    let text = inner.trim();
    if text.is_empty() {
        return;
    }

    if is_external(href) {
        out.push_str(&format!("{} ({})", text, href));
    } else {
        out.push_str(text);
    }
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Collapse text to a single line.
///
/// Splits on line boundaries, trims each line, splits the remainder on
/// double spaces, drops empty fragments and joins what is left with one
/// space. Tabs count as spaces.
pub fn collapse_whitespace(text: &str) -> String {
    let spaced = text.replace('\t', " ");
    spaced
        .split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
