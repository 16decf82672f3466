// src/lib.rs
// =============================================================================
// sitechat: crawl one website into a plain-text corpus, then answer
// questions about it through an LLM chat completion API.
//
// - crawl: the bounded breadth-first site crawler (the core)
// - relay: prompt building and the Gemini client
// - error: typed errors shared by both
//
// The binary in main.rs is a thin CLI over these modules.
// =============================================================================

pub mod crawl;
pub mod error;
pub mod relay;

pub use crawl::{crawl, crawl_site, Corpus, CrawlConfig, CrawlReport};
pub use error::{ConfigError, FetchError, RelayError};
pub use relay::ChatRelay;
