// src/crawl/fetch.rs
// =============================================================================
// Fetches one page over HTTP.
//
// - GET with a fixed per-request timeout
// - Redirects are followed transparently (up to 10 hops)
// - Anything other than a 2xx final status is a FetchError
//
// The fetcher keeps no state between calls apart from reqwest's connection
// pool; the crawl scheduler decides what to do with a failure.
// =============================================================================

use std::time::Duration;

use reqwest::{redirect, Client};
use tracing::debug;
use url::Url;

use crate::crawl::config::CrawlConfig;
use crate::error::{ConfigError, FetchError};

const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Where the request ended up after redirects
    pub final_url: Url,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &CrawlConfig) -> Result<Self, ConfigError> {
        Self::new(config.request_timeout, &config.user_agent)
    }

    // Fetches a web page and returns its body as text
    //
    // Errors: timeout, connection failure, redirect loop, non-2xx status,
    // unreadable body. All of them are recoverable for the crawl.
    pub async fn fetch(&self, url: &Url) -> Result<RawPage, FetchError> {
        debug!(url = %url, "fetching page");

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(RawPage {
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}
