// src/crawl/extract.rs
// =============================================================================
// Turns an HTML page into readable text plus the links it contains.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM tree (built on html5ever, the browser-grade
//   parser), so broken markup still produces a best-effort tree
// - Supports CSS selectors for finding the <a href> elements
//
// The tree is never modified. Text is a filtered projection of it: the
// walk simply does not descend into scripts, styles, embedded media
// (<img>, <picture>, <svg>, <video>, <audio>, <iframe>, <object>) or
// <noscript>/<template>, so their content cannot leak into the output.
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Node, Selector};
use url::Url;

use crate::crawl::classify::canonicalize;

// Elements whose whole subtree is dropped from the text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "img", "picture", "svg", "video", "audio", "iframe", "object",
    "noscript", "template",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    /// Canonical form of every <a href>, de-duplicated, in document order.
    /// Not filtered by domain or extension.
    pub links: Vec<Url>,
}

// Extracts visible text and outbound links from an HTML page
//
// Parameters:
//   html: the page source
//   base_url: the page's own URL, used to resolve relative hrefs
//
// Example:
//   html = "<script>evil()</script>Hello <a href='/about'>About</a> World"
//   base_url = "https://site.test/"
//   text  = "Hello About World"
//   links = ["https://site.test/about"]
pub fn extract(html: &str, base_url: &Url) -> Extracted {
    let document = Html::parse_document(html);

    Extracted {
        text: visible_text(&document),
        links: outbound_links(&document, base_url),
    }
}

// Walks the tree in document order with an explicit stack, so deeply nested
// (or badly broken) markup cannot overflow the call stack.
fn visible_text(document: &Html) -> String {
    let mut runs: Vec<&str> = Vec::new();
    let mut stack = vec![*document.root_element()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let run = text.text.trim();
                if !run.is_empty() {
                    runs.push(run);
                }
            }
            Node::Element(element) => {
                if SKIPPED_ELEMENTS.contains(&element.name()) {
                    continue;
                }
                // Reversed so the first child is popped first
                stack.extend(node.children().rev());
            }
            _ => {}
        }
    }

    runs.join(" ")
}

fn outbound_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(url) = canonicalize(href, base_url) {
            if seen.insert(url.as_str().to_string()) {
                links.push(url);
            }
        }
    }

    links
}
