// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-domain restriction (never leaves the seed's host)
// - Skips links to images, media, documents, archives and executables
// - Canonical URLs (no query/fragment) so each page is fetched once
// - Page budget instead of a depth limit
// - Polite crawling with a fixed delay between requests
//
// Submodules, leaf-first:
// - classify: canonicalize / is_crawlable / same_domain
// - fetch: one bounded-timeout HTTP GET
// - extract: visible text + links from HTML
// - queue: the BFS scheduler that ties them together
// - corpus, config: the data going in and coming out
// =============================================================================

mod classify;
mod config;
mod corpus;
mod extract;
mod fetch;
mod queue;

pub use classify::{canonicalize, is_crawlable, same_domain, SKIP_EXTENSIONS};
pub use config::{
    CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_POLITENESS_DELAY, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_USER_AGENT,
};
pub use corpus::{Corpus, CrawlReport, FetchFailure, PageRecord, PageText};
pub use extract::{extract, Extracted};
pub use fetch::{PageFetcher, RawPage};
pub use queue::{crawl, crawl_site, Crawler};
