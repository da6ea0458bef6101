use url::Url;

/// Resolves a raw href against the page it was found on
///
/// Only links that stay on the page's host survive resolution:
///
/// - an empty href resolves to `None`
/// - an absolute URL on the same host is returned verbatim
/// - an absolute URL on a different host resolves to `None`
/// - anything else (a relative reference, including scheme-only forms
///   like `mailto:`) is resolved against `base` per the standard rules
///   for `.`/`..` segments and query/fragment composition
///
/// A network-path reference (`//host/path`) picks up the base scheme
/// during resolution and is then subject to the same host check.
///
/// Hosts compare by name and explicit port; the scheme takes no part in
/// the comparison, the same identity the dedup key uses.
///
/// # Arguments
///
/// * `base` - The final URL of the page the link was found on
/// * `raw` - The href attribute value as written in the document
///
/// # Examples
///
/// ```
/// use ambler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("http://example.com/x/y").unwrap();
/// assert_eq!(
///     resolve_link(&base, "/about").as_deref(),
///     Some("http://example.com/about")
/// );
/// assert_eq!(resolve_link(&base, "http://other.com/z"), None);
/// ```
pub fn resolve_link(base: &Url, raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(absolute) = Url::parse(raw) {
        if absolute.host_str().is_some() {
            return if same_host(&absolute, base) {
                Some(raw.to_string())
            } else {
                None
            };
        }
    }

    let resolved = base.join(raw).ok()?;
    if resolved.host_str().is_some() && !same_host(&resolved, base) {
        return None;
    }
    Some(resolved.to_string())
}

/// Host identity: name plus explicit port, scheme ignored
fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}
