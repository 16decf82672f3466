// src/crawl/corpus.rs
// =============================================================================
// What a crawl produces.
//
// - PageRecord: url -> text, in the order pages finished fetching. An entry
//   is written once and never changed.
// - CrawlReport: the page record plus the fetches that failed
// - Corpus: every page's text joined by a blank line, built once at the end
//   of the crawl and then only ever read
//
// Corpus wraps an Arc<str>, so handing it to many concurrent readers is a
// reference-count bump, not a copy, and needs no lock.
// =============================================================================

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

pub const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageRecord {
    entries: Vec<PageText>,
    // Index over entries so duplicate checks stay O(1)
    urls: HashSet<String>,
}

// Serialized as the plain list of entries
impl Serialize for PageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl PageRecord {
    pub fn new() -> Self {
        Self::default()
    }

    // Records a page's text. Returns false (and keeps the first text) if the
    // URL already has an entry.
    pub fn insert(&mut self, url: impl Into<String>, text: impl Into<String>) -> bool {
        let url = url.into();
        if !self.urls.insert(url.clone()) {
            return false;
        }
        self.entries.push(PageText {
            url,
            text: text.into(),
        });
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageText> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub pages: PageRecord,
    pub failures: Vec<FetchFailure>,
}

impl CrawlReport {
    pub fn corpus(&self) -> Corpus {
        let texts: Vec<&str> = self.pages.iter().map(|page| page.text.as_str()).collect();
        Corpus::new(texts.join(PAGE_SEPARATOR))
    }
}

/// The aggregated plain text of a whole crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus(Arc<str>);

impl Corpus {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
