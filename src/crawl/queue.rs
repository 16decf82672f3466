// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl itself with a breadth-first approach.
//
// How it works:
// 1. Start with the canonical seed URL in the frontier
// 2. Pop the oldest URL (FIFO is what makes this breadth-first)
// 3. Skip it if already visited or not crawlable (does not use budget)
// 4. Fetch it; on failure log, record the failure and move on
// 5. On success store the page text, mark visited, and append every new
//    same-domain, crawlable link to the back of the frontier
// 6. Wait the politeness delay, repeat until the frontier is empty or
//    max_pages pages have been fetched
//
// A failed URL is never added to visited. If another page links to it
// later it is queued and tried again, still within the page budget.
//
// Everything runs strictly one fetch at a time: the frontier and visited set
// are plain owned collections, and the delay assumes sequential requests.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};
use url::Url;

use crate::crawl::classify::{canonicalize, is_crawlable, same_domain};
use crate::crawl::config::CrawlConfig;
use crate::crawl::corpus::{Corpus, CrawlReport, FetchFailure};
use crate::crawl::extract::extract;
use crate::crawl::fetch::PageFetcher;
use crate::error::ConfigError;

// URLs waiting to be fetched, oldest first, never holding the same URL twice
#[derive(Debug, Default)]
struct Frontier {
    queue: VecDeque<Url>,
    queued: HashSet<String>,
}

impl Frontier {
    fn push(&mut self, url: Url) -> bool {
        if !self.queued.insert(url.as_str().to_string()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.queued.remove(url.as_str());
        Some(url)
    }

    fn contains(&self, url: &Url) -> bool {
        self.queued.contains(url.as_str())
    }
}

/// A single crawl run. Consumed by [`Crawler::run`], so it cannot be restarted.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: PageFetcher,
    frontier: Frontier,
    visited: HashSet<String>,
    report: CrawlReport,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self, ConfigError> {
        let fetcher = PageFetcher::from_config(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: CrawlConfig, fetcher: PageFetcher) -> Self {
        let mut frontier = Frontier::default();
        if let Some(seed) = canonicalize(config.seed.as_str(), &config.seed) {
            frontier.push(seed);
        }

        Self {
            config,
            fetcher,
            frontier,
            visited: HashSet::new(),
            report: CrawlReport::default(),
        }
    }

    pub async fn run(mut self) -> CrawlReport {
        info!(
            seed = %self.config.seed,
            max_pages = self.config.max_pages,
            "starting crawl"
        );

        while self.visited.len() < self.config.max_pages {
            let Some(url) = self.frontier.pop() else {
                break;
            };

            if self.visited.contains(url.as_str()) || !is_crawlable(&url) {
                debug!(url = %url, "skipping");
                continue;
            }

            self.visit(url).await;

            // Polite crawling: pause after every fetch attempt
            if !self.config.politeness_delay.is_zero() {
                tokio::time::sleep(self.config.politeness_delay).await;
            }
        }

        info!(
            pages = self.report.pages.len(),
            failures = self.report.failures.len(),
            "crawl finished"
        );

        self.report
    }

    async fn visit(&mut self, url: Url) {
        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "failed to fetch page");
                self.report.failures.push(FetchFailure {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        info!(url = %url, status = page.status, "crawled page");
        if page.final_url != url {
            debug!(url = %url, final_url = %page.final_url, "followed redirect");
        }

        // Relative links resolve against the URL we asked for, not the
        // post-redirect one, so a redirect off-site cannot widen the crawl.
        let extracted = extract(&page.body, &url);

        self.report.pages.insert(url.as_str(), extracted.text);
        self.visited.insert(url.to_string());

        for link in extracted.links {
            if self.visited.contains(link.as_str())
                || self.frontier.contains(&link)
                || !is_crawlable(&link)
                || !same_domain(&link, &self.config.seed)
            {
                continue;
            }
            self.frontier.push(link);
        }
    }
}

// Crawls a website according to `config` and returns every page's text plus
// the failed fetches.
pub async fn crawl_site(config: CrawlConfig) -> Result<CrawlReport, ConfigError> {
    Ok(Crawler::new(config)?.run().await)
}

// Crawls from `seed` with default timing and returns the joined corpus.
//
// Example:
//   let corpus = crawl("https://example.com/", DEFAULT_MAX_PAGES).await?;
pub async fn crawl(seed: &str, max_pages: usize) -> Result<Corpus, ConfigError> {
    let config = CrawlConfig::new(seed, max_pages)?;
    Ok(crawl_site(config).await?.corpus())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(text: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{href}"></a>"#))
            .collect();
        format!("<html><body><p>{text}</p>{anchors}</body></html>")
    }

    async fn serve(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    async fn serve_times(server: &MockServer, route: &str, template: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .expect(times)
            .mount(server)
            .await;
    }

    fn config(server: &MockServer, max_pages: usize) -> CrawlConfig {
        CrawlConfig::new(&format!("{}/", server.uri()), max_pages)
            .unwrap()
            .with_politeness_delay(Duration::ZERO)
            .with_request_timeout(Duration::from_secs(5))
    }

    fn crawled_paths(report: &CrawlReport, server: &MockServer) -> Vec<String> {
        report
            .pages
            .iter()
            .map(|p| p.url.trim_start_matches(&server.uri()).to_string())
            .collect()
    }

    #[test]
    fn test_frontier_rejects_duplicates() {
        let mut frontier = Frontier::default();
        let url = Url::parse("https://site.test/a").unwrap();
        assert!(frontier.push(url.clone()));
        assert!(!frontier.push(url.clone()));
        assert!(frontier.contains(&url));
        assert_eq!(frontier.pop(), Some(url.clone()));
        assert!(!frontier.contains(&url));
        assert_eq!(frontier.pop(), None);
    }

    #[tokio::test]
    async fn test_crawl_is_breadth_first() {
        let server = MockServer::start().await;
        serve(&server, "/", page("root", &["/a", "/b"])).await;
        serve(&server, "/a", page("page a", &["/c"])).await;
        serve(&server, "/b", page("page b", &["/d"])).await;
        serve(&server, "/c", page("page c", &[])).await;
        serve(&server, "/d", page("page d", &[])).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/a", "/b", "/c", "/d"]);
        assert_eq!(
            report.corpus().as_str(),
            "root\n\npage a\n\npage b\n\npage c\n\npage d"
        );
    }

    #[tokio::test]
    async fn test_budget_of_one_fetches_only_seed() {
        let server = MockServer::start().await;
        serve(&server, "/", page("home", &["/1", "/2", "/3", "/4", "/5"])).await;
        for route in ["/1", "/2", "/3", "/4", "/5"] {
            serve_times(&server, route, ResponseTemplate::new(200), 0).await;
        }

        let report = crawl_site(config(&server, 1)).await.unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.corpus().as_str(), "home");
    }

    #[tokio::test]
    async fn test_page_count_never_exceeds_budget() {
        let server = MockServer::start().await;
        let links: Vec<String> = (0..10).map(|i| format!("/p{i}")).collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
        serve(&server, "/", page("home", &link_refs)).await;
        for route in &links {
            serve(&server, route, page(route, &link_refs)).await;
        }

        let report = crawl_site(config(&server, 4)).await.unwrap();

        assert_eq!(report.pages.len(), 4);
        assert_eq!(crawled_paths(&report, &server), vec!["/", "/p0", "/p1", "/p2"]);
    }

    #[tokio::test]
    async fn test_seed_timeout_gives_empty_corpus() {
        let server = MockServer::start().await;
        serve_times(
            &server,
            "/",
            ResponseTemplate::new(200).set_delay(Duration::from_secs(2)),
            1,
        )
        .await;

        let config = config(&server, 30).with_request_timeout(Duration::from_millis(100));
        let report = crawl_site(config).await.unwrap();

        assert!(report.pages.is_empty());
        assert!(report.corpus().is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, "request timed out");
    }

    #[tokio::test]
    async fn test_skip_listed_links_are_never_fetched() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/",
            page("home", &["/brochure.pdf", "/logo.PNG", "/about"]),
        )
        .await;
        serve(&server, "/about", page("about", &[])).await;
        serve_times(&server, "/brochure.pdf", ResponseTemplate::new(200), 0).await;
        serve_times(&server, "/logo.PNG", ResponseTemplate::new(200), 0).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/about"]);
    }

    #[tokio::test]
    async fn test_cross_domain_links_are_never_followed() {
        let server = MockServer::start().await;
        let other = MockServer::start().await;
        serve_times(&other, "/x", ResponseTemplate::new(200), 0).await;

        let external = format!("{}/x", other.uri());
        serve(&server, "/", page("home", &[external.as_str()])).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(report.pages.len(), 1);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_links_fetched_once() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/",
            page("home", &["/docs?a=1", "/docs#top", "/docs", "/"]),
        )
        .await;
        serve_times(
            &server,
            "/docs",
            ResponseTemplate::new(200).set_body_string(page("docs", &["/", "/docs?again"])),
            1,
        )
        .await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/docs"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_abort_crawl() {
        let server = MockServer::start().await;
        serve(&server, "/", page("home", &["/broken", "/ok"])).await;
        serve_times(&server, "/broken", ResponseTemplate::new(500), 1).await;
        serve(&server, "/ok", page("fine", &[])).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/ok"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].reason, "HTTP 500");
        assert_eq!(report.corpus().as_str(), "home\n\nfine");
    }

    #[tokio::test]
    async fn test_failed_url_is_retried_when_rediscovered() {
        let server = MockServer::start().await;
        serve(&server, "/", page("home", &["/flaky", "/next"])).await;
        serve(&server, "/next", page("next", &["/flaky"])).await;
        serve_times(&server, "/flaky", ResponseTemplate::new(503), 2).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/next"]);
        assert_eq!(report.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_redirected_page_is_recorded_under_requested_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/landing", server.uri())),
            )
            .mount(&server)
            .await;
        serve(&server, "/landing", page("landing", &["/about"])).await;
        serve(&server, "/about", page("about", &[])).await;

        let report = crawl_site(config(&server, 30)).await.unwrap();

        assert_eq!(crawled_paths(&report, &server), vec!["/", "/about"]);
        assert_eq!(report.corpus().as_str(), "landing\n\nabout");
    }

    #[tokio::test]
    async fn test_politeness_delay_follows_failed_fetch() {
        let server = MockServer::start().await;
        serve_times(&server, "/", ResponseTemplate::new(404), 1).await;

        let config = config(&server, 30).with_politeness_delay(Duration::from_millis(200));
        let started = std::time::Instant::now();
        let report = crawl_site(config).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(200));
        assert_eq!(report.failures[0].reason, "HTTP 404");
    }

    #[tokio::test]
    async fn test_crawl_rejects_bad_config() {
        assert_eq!(crawl("", 30).await.unwrap_err(), ConfigError::MissingSeed);
        assert_eq!(
            crawl("https://site.test/", 0).await.unwrap_err(),
            ConfigError::InvalidBudget
        );
    }
}
