//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with content-type checks
//! - HTML parsing and link extraction
//! - The frontier of URLs still to visit
//! - The per-seed crawl session

mod engine;
mod fetcher;
mod frontier;
mod parser;

pub use engine::{CrawlReport, CrawlSession, SessionEnd};
pub use fetcher::{build_http_client, fetch_url, FetchResult, USER_AGENT};
pub use frontier::{CrawlTarget, Frontier};
pub use parser::extract_links;

use crate::config::CrawlConfig;
use crate::storage::PageStore;

/// Runs one crawl session per seed URL
///
/// Sessions are independent: each seed gets a fresh frontier, so two
/// seeds on the same host will each fetch pages the other already saw.
/// The page store is shared, which keeps their files deduplicated on
/// disk. Sessions run strictly one after another, in seed order.
///
/// # Arguments
///
/// * `seeds` - The seed URLs, already scheme-validated
/// * `config` - The crawl settings
/// * `store` - The page store to save fetched pages into
///
/// # Returns
///
/// * `Ok(Vec<CrawlReport>)` - One report per seed, in seed order
/// * `Err(reqwest::Error)` - The HTTP client could not be built
pub async fn crawl(
    seeds: &[String],
    config: &CrawlConfig,
    store: &mut PageStore,
) -> Result<Vec<CrawlReport>, reqwest::Error> {
    let client = build_http_client()?;
    let mut reports = Vec::with_capacity(seeds.len());

    for seed in seeds {
        tracing::info!(seed = seed.as_str(), "starting crawl session");
        let session = CrawlSession::new(seed, &client, store, config);
        reports.push(session.run().await);
    }

    Ok(reports)
}
