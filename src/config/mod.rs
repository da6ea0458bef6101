//! Configuration module for Ambler
//!
//! Crawl settings come entirely from the command line. This module scans
//! the argument tokens into a [`CrawlConfig`] plus the seed URLs.
//!
//! # Example
//!
//! ```
//! use ambler::config::parse_args;
//!
//! let args = vec!["-r".to_string(), "http://example.com/".to_string()];
//! let parsed = parse_args(&args).unwrap();
//! assert!(parsed.config.recursive);
//! ```

mod args;
mod types;

// Re-export types
pub use types::{CrawlConfig, DEFAULT_WAIT_SECS};

// Re-export the argument scanner
pub use args::{parse_args, ParsedArgs};
