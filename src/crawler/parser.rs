use scraper::{Html, Selector};

/// Extracts the `href` value of every anchor element in a document
///
/// Values come back in document order, exactly as written in the markup.
/// Anchors with no `href` attribute contribute an empty string, so the
/// result has one entry per anchor. Malformed markup is parsed leniently
/// and never produces an error.
///
/// # Arguments
///
/// * `html` - The HTML content to scan
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a") {
        for element in document.select(&selector) {
            let href = element.value().attr("href").unwrap_or("");
            links.push(href.to_string());
        }
    }

    links
}
