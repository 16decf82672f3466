// src/crawl/config.rs
// =============================================================================
// Crawl settings, validated once before anything is fetched.
//
// A bad seed URL or a zero page budget is a ConfigError: the crawl never
// starts. Everything else has a sensible default and can be overridden with
// the with_* builder methods.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_MAX_PAGES: usize = 30;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_USER_AGENT: &str = concat!("sitechat/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: Url,
    pub max_pages: usize,
    pub request_timeout: Duration,
    /// Pause after every fetch attempt, successful or not
    pub politeness_delay: Duration,
    pub user_agent: String,
}

impl CrawlConfig {
    // Validates the seed URL and page budget.
    //
    // Errors:
    //   ""                    -> MissingSeed
    //   "not a url", "ftp://" -> InvalidSeed
    //   max_pages == 0        -> InvalidBudget
    pub fn new(seed: &str, max_pages: usize) -> Result<Self, ConfigError> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(ConfigError::MissingSeed);
        }

        let parsed = Url::parse(seed).map_err(|e| ConfigError::InvalidSeed {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidSeed {
                url: seed.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidSeed {
                url: seed.to_string(),
                reason: "URL has no host".to_string(),
            });
        }

        if max_pages == 0 {
            return Err(ConfigError::InvalidBudget);
        }

        Ok(Self {
            seed: parsed,
            max_pages,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            politeness_delay: DEFAULT_POLITENESS_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
