use url::Url;

/// Checks whether a URL is acceptable as a crawl seed
///
/// A URL passes only if it parses and its scheme is exactly `http` or
/// `https`. Malformed or relative inputs are rejected.
///
/// # Arguments
///
/// * `url` - The URL string to check
///
/// # Examples
///
/// ```
/// use ambler::url::is_valid_scheme;
///
/// assert!(is_valid_scheme("http://example.com/"));
/// assert!(is_valid_scheme("https://example.com/page"));
/// assert!(!is_valid_scheme("ftp://example.com/"));
/// assert!(!is_valid_scheme("example.com/no-scheme"));
/// ```
pub fn is_valid_scheme(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Returns the scheme-insensitive identity key for a URL
///
/// The leading `http://` or `https://` prefix is stripped (matched
/// case-insensitively), so two URLs that differ only in scheme map to the
/// same key. URLs without an http(s) prefix are returned unchanged; after
/// seed validation such URLs should not normally reach this function.
///
/// # Examples
///
/// ```
/// use ambler::url::normalized_key;
///
/// assert_eq!(normalized_key("http://example.com/a"), "example.com/a");
/// assert_eq!(normalized_key("https://example.com/a"), "example.com/a");
/// ```
pub fn normalized_key(url: &str) -> String {
    for prefix in ["http://", "https://"] {
        if let Some(head) = url.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return url[prefix.len()..].to_string();
            }
        }
    }
    url.to_string()
}
