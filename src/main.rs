// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Run the crawl exactly once
// 4. Print the corpus, or hand it to the chat relay
// 5. Exit with proper code (0 = success, 1 = empty corpus, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use sitechat::crawl::crawl_site;
use sitechat::relay::{ChatRelay, GeminiClient};
use sitechat::RelayError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Configuration and setup errors are fatal
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so the corpus / JSON on stdout can be piped
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sitechat=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = corpus has text (and chat finished)
//   Ok(1) = the crawl produced no text
//   Err   = configuration or setup error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl { crawl, json } => handle_crawl(&crawl, json).await,
        Commands::Chat {
            crawl,
            message,
            api_key,
            model,
            assistant,
        } => {
            let client = GeminiClient::new(api_key)
                .context("could not set up the completion client")?
                .with_model(model);
            handle_chat(&crawl, client, &assistant, message).await
        }
    }
}

async fn handle_crawl(args: &CrawlArgs, json: bool) -> Result<i32> {
    let config = args.to_config()?;
    let report = crawl_site(config).await?;
    let corpus = report.corpus();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", corpus);
    }

    Ok(if corpus.is_empty() { 1 } else { 0 })
}

async fn handle_chat(
    args: &CrawlArgs,
    client: GeminiClient,
    assistant: &str,
    message: Option<String>,
) -> Result<i32> {
    let config = args.to_config()?;
    info!(seed = %config.seed, "crawling website before answering questions");

    // Crawled once; the relay only ever reads it afterwards
    let corpus = crawl_site(config).await?.corpus();
    if corpus.is_empty() {
        info!("crawl produced no text, answers will not be grounded");
    }

    let relay = ChatRelay::new(corpus, client, assistant);
    info!(corpus_len = relay.corpus().as_str().len(), "ready for questions");
    let empty_corpus = relay.corpus().is_empty();

    if let Some(message) = message {
        let reply = relay.reply(&message).await?;
        println!("{}", reply);
        return Ok(if empty_corpus { 1 } else { 0 });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match relay.reply(&line).await {
            Ok(reply) => println!("{}\n", reply),
            // Blank lines are just skipped in interactive mode
            Err(RelayError::EmptyMessage) => continue,
            Err(e) => {
                error!(error = %e, "chat request failed");
                println!("Oops! Something went wrong.\n");
            }
        }
    }

    Ok(if empty_corpus { 1 } else { 0 })
}
