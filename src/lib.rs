//! Ambler: a small single-host web crawler
//!
//! Ambler fetches pages one at a time with a fixed pause between
//! requests, optionally following links that stay on the seed's host,
//! and saves every fetched page into a flat file store.

pub mod config;
pub mod crawler;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Errors that abort a run before any network activity
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("only http or https URLs can be requested, got \"{0}\"")]
    InvalidScheme(String),

    #[error("supply a URL to retrieve")]
    NoUrls,
}

// Re-export commonly used types
pub use config::{parse_args, CrawlConfig, ParsedArgs};
pub use crawler::{
    crawl, CrawlReport, CrawlSession, CrawlTarget, FetchResult, Frontier, SessionEnd,
};
pub use storage::{ensure_output_dir, PageStore, StoreError};
pub use url::{is_valid_scheme, normalized_key, resolve_link};
