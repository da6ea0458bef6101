//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent string
//! - GET requests to fetch page content
//! - Content-Type inspection to skip non-HTML responses
//! - Error classification
//!
//! Fetching never panics and never returns an `Err`; every outcome is a
//! [`FetchResult`] variant the crawl loop can act on.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("ambler/", env!("CARGO_PKG_VERSION"));

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// Declared media type, lowercased, parameters stripped
        content_type: String,
        /// Response headers as `name: value` lines plus a blank line
        header_block: String,
        /// Page body content
        body: String,
    },

    /// Response carried something other than HTML
    NonHtml {
        /// The actual media type received
        content_type: String,
    },

    /// The request did not produce a usable response
    Failed {
        /// Error description
        reason: String,
    },
}

/// Builds the HTTP client used for every request of a run
///
/// Redirects are followed by the client itself, so a fetch reports the
/// final post-redirect URL.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ambler::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Announces the attempt on stdout before any network activity, then:
///
/// 1. Send the GET request; transport errors become [`FetchResult::Failed`]
/// 2. Any non-2xx status becomes [`FetchResult::Failed`]
/// 3. A media type other than `text/html` becomes [`FetchResult::NonHtml`]
///    without reading the body
/// 4. Otherwise the body is read and returned as [`FetchResult::Success`]
///    together with the final URL and the response header block
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    println!("Crawling: {url}");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return failed(url, classify_error(&e)),
    };

    let status = response.status();
    if !status.is_success() {
        return failed(url, format!("HTTP {status}"));
    }

    let content_type = declared_media_type(response.headers());
    if content_type != "text/html" {
        println!("-- Skipping {content_type} content");
        tracing::debug!(url, content_type = content_type.as_str(), "skipped non-HTML response");
        return FetchResult::NonHtml { content_type };
    }

    // Capture before text() consumes the response
    let final_url = response.url().clone();
    let header_block = format_header_block(response.headers());

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            content_type,
            header_block,
            body,
        },
        Err(e) => failed(url, classify_error(&e)),
    }
}

/// Reports a failed attempt and wraps the reason
fn failed(url: &str, reason: String) -> FetchResult {
    println!("-- Could not access: {reason}");
    tracing::warn!(url, reason = reason.as_str(), "fetch failed");
    FetchResult::Failed { reason }
}

fn classify_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    }
}

/// Media type declared by the response, lowercased with parameters
/// stripped; a missing or unreadable header counts as `text/plain`
fn declared_media_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|media| media.trim().to_ascii_lowercase())
        .filter(|media| !media.is_empty())
        .unwrap_or_else(|| "text/plain".to_string())
}

/// Renders response headers as `name: value` lines followed by a blank
/// line, the way they would appear on the wire
fn format_header_block(headers: &HeaderMap) -> String {
    let mut block = String::new();
    for (name, value) in headers {
        block.push_str(name.as_str());
        block.push_str(": ");
        block.push_str(&String::from_utf8_lossy(value.as_bytes()));
        block.push('\n');
    }
    block.push('\n');
    block
}
