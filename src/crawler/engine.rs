//! Crawl engine
//!
//! Drives one session per seed URL: pop a target, fetch it, persist and
//! extract on success, pause, repeat. Everything is sequential; there is
//! never more than one request in flight.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::frontier::{CrawlTarget, Frontier};
use crate::crawler::parser::extract_links;
use crate::storage::PageStore;
use crate::url::resolve_link;
use reqwest::Client;
use url::Url;

/// Why a crawl session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The page limit was hit; anything still queued was abandoned
    LimitReached,

    /// The frontier ran dry
    FrontierExhausted,
}

/// Counters describing a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlReport {
    /// How the session ended
    pub end: SessionEnd,

    /// URLs taken off the frontier and attempted
    pub attempts: u32,

    /// HTML pages fetched successfully
    pub pages_crawled: u32,

    /// Pacing pauses taken between attempts
    pub delays: u32,
}

/// A single crawl session: one seed, one frontier, one run
///
/// The page store outlives the session, so filenames stay deduplicated
/// across every session of a run.
pub struct CrawlSession<'a> {
    client: &'a Client,
    store: &'a mut PageStore,
    config: &'a CrawlConfig,
    frontier: Frontier,
    pages_crawled: u32,
}

impl<'a> CrawlSession<'a> {
    pub fn new(
        seed: &str,
        client: &'a Client,
        store: &'a mut PageStore,
        config: &'a CrawlConfig,
    ) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(seed);

        Self {
            client,
            store,
            config,
            frontier,
            pages_crawled: 0,
        }
    }

    /// Runs the session until the limit is hit or the frontier is empty
    ///
    /// Each iteration checks the limit before touching the frontier, so a
    /// limit of zero stops the session without a single request. The
    /// pacing pause is skipped once no further attempt can follow.
    pub async fn run(mut self) -> CrawlReport {
        let mut attempts: u32 = 0;
        let mut delays: u32 = 0;

        let end = loop {
            if self.limit_reached() {
                if let Some(limit) = self.config.effective_limit() {
                    println!("Limit {limit} reached");
                }
                break SessionEnd::LimitReached;
            }

            let Some(target) = self.frontier.pop() else {
                break SessionEnd::FrontierExhausted;
            };

            attempts += 1;
            self.process(&target).await;

            // No pause after the last attempt of a session
            if self.frontier.is_empty() || self.limit_reached() {
                continue;
            }

            delays += 1;
            tokio::time::sleep(self.config.wait).await;
        };

        tracing::info!(
            attempts,
            pages_crawled = self.pages_crawled,
            delays,
            end = ?end,
            "crawl session finished"
        );

        CrawlReport {
            end,
            attempts,
            pages_crawled: self.pages_crawled,
            delays,
        }
    }

    /// Fetches one target and applies the outcome
    ///
    /// Failures and non-HTML responses are logged and dropped. A fetched
    /// page counts toward the limit even if saving it fails.
    async fn process(&mut self, target: &CrawlTarget) {
        match fetch_url(self.client, target.url()).await {
            FetchResult::Failed { reason } => {
                tracing::debug!(
                    url = target.url(),
                    reason = reason.as_str(),
                    "continuing after failed fetch"
                );
            }
            FetchResult::NonHtml { content_type } => {
                tracing::debug!(
                    url = target.url(),
                    content_type = content_type.as_str(),
                    "nothing to extract"
                );
            }
            FetchResult::Success {
                final_url,
                content_type,
                header_block,
                body,
            } => {
                if let Err(e) = self.store.save(final_url.as_str(), &header_block, &body) {
                    tracing::error!(url = final_url.as_str(), error = %e, "could not save page");
                }

                self.pages_crawled += 1;
                tracing::debug!(
                    url = final_url.as_str(),
                    content_type = content_type.as_str(),
                    bytes = body.len(),
                    "page fetched"
                );

                if self.config.recursive {
                    self.enqueue_links(&final_url, &body);
                }
            }
        }
    }

    /// Extracts the page's links and queues the ones that stay on-host
    ///
    /// Links resolve against the final post-redirect URL, so relative
    /// paths on a redirected page point where the server meant them to.
    fn enqueue_links(&mut self, page_url: &Url, body: &str) {
        let links = extract_links(body);
        let found = links.len();
        let mut enqueued = 0;

        for link in links {
            if let Some(next) = resolve_link(page_url, &link) {
                if self.frontier.push(next) {
                    enqueued += 1;
                }
            }
        }

        tracing::debug!(url = page_url.as_str(), found, enqueued, "links processed");
    }

    fn limit_reached(&self) -> bool {
        self.config
            .effective_limit()
            .is_some_and(|limit| self.pages_crawled >= limit)
    }
}
