// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: crawl a site and print the corpus (or a JSON report)
// - chat:  crawl a site once, then answer questions about it
//
// Options shared by both live in CrawlArgs and are pulled into each
// subcommand with #[command(flatten)]. Every option can also be set through
// an environment variable (clap's `env` feature), which is how the API key
// is normally supplied.
// =============================================================================

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sitechat::crawl::{CrawlConfig, DEFAULT_MAX_PAGES, DEFAULT_USER_AGENT};
use sitechat::relay::DEFAULT_MODEL;
use sitechat::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "sitechat",
    version,
    about = "Crawl a website into a text corpus and chat about it with an LLM",
    long_about = "sitechat crawls a single website breadth-first, extracts the readable text of \
                  every page it reaches, and uses that text as grounding context for a chat \
                  completion call.\n\n\
                  Exit codes: 0 = success, 1 = the crawl produced no text, 2 = error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and print the extracted text
    ///
    /// Example: sitechat crawl https://example.com --max-pages 10
    Crawl {
        #[command(flatten)]
        crawl: CrawlArgs,

        /// Print a JSON report (pages + failed fetches) instead of the corpus
        #[arg(long)]
        json: bool,
    },

    /// Crawl a website, then answer questions using its content
    ///
    /// Without --message, every non-empty line read from stdin is a question.
    ///
    /// Example: sitechat chat https://example.com --message "What do you offer?"
    Chat {
        #[command(flatten)]
        crawl: CrawlArgs,

        /// Ask a single question and exit
        #[arg(long, short)]
        message: Option<String>,

        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Gemini model name
        #[arg(long, env = "SITECHAT_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// Who the assistant speaks for, used in the prompt
        #[arg(long, env = "SITECHAT_ASSISTANT", default_value = "this website")]
        assistant: String,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Website URL to start from (e.g., https://example.com)
    pub seed_url: String,

    /// Maximum number of pages to fetch successfully
    #[arg(long, env = "SITECHAT_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "SITECHAT_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Pause after each fetch, in milliseconds
    #[arg(long, env = "SITECHAT_DELAY_MS", default_value_t = 500)]
    pub delay_ms: u64,

    /// User-Agent header sent with every page request
    #[arg(long, env = "SITECHAT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl CrawlArgs {
    pub fn to_config(&self) -> Result<CrawlConfig, ConfigError> {
        Ok(CrawlConfig::new(&self.seed_url, self.max_pages)?
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_politeness_delay(Duration::from_millis(self.delay_ms))
            .with_user_agent(&self.user_agent))
    }
}
