// src/error.rs
// =============================================================================
// Typed errors for the crawler and the chat relay.
//
// Three families:
// - FetchError: a single page could not be fetched (recoverable, the crawl
//   logs it and moves on)
// - ConfigError: the crawl cannot start at all (fatal at startup)
// - RelayError: a chat question could not be answered
//
// main.rs still uses anyhow::Result for glue code; these enums are what the
// crawl and relay modules return so callers can match on the cause.
// =============================================================================

use thiserror::Error;

/// Why a single page fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not finish within the per-request timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// Redirect loop or redirect chain longer than the client allows
    #[error("too many redirects")]
    TooManyRedirects,

    /// DNS failure, refused connection, TLS handshake failure, ...
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// Any other request-level failure
    #[error("request failed: {message}")]
    Request { message: String },

    /// The response body could not be read as text
    #[error("could not read response body: {message}")]
    Body { message: String },
}

impl From<reqwest::Error> for FetchError {
    // Same bucketing the link checker used: timeout first, then redirects,
    // then connection problems, and everything else as a generic failure.
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if error.is_connect() {
            FetchError::Connect {
                message: error.to_string(),
            }
        } else if error.is_body() || error.is_decode() {
            FetchError::Body {
                message: error.to_string(),
            }
        } else {
            FetchError::Request {
                message: error.to_string(),
            }
        }
    }
}

/// The crawl configuration is unusable; nothing is fetched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a seed URL is required")]
    MissingSeed,

    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("page budget must be at least 1")]
    InvalidBudget,

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Why the chat relay could not produce a reply.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no message provided")]
    EmptyMessage,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion API returned no reply text")]
    EmptyReply,
}
