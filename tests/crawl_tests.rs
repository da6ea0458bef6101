//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise
//! whole crawl sessions end-to-end, with the pacing pause set to zero
//! except where the pause itself is under test.

use ambler::config::CrawlConfig;
use ambler::crawler::{build_http_client, crawl, CrawlReport, CrawlSession, SessionEnd, USER_AGENT};
use ambler::storage::{page_file_name, PageStore};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates crawl settings with no pacing pause
fn test_config(recursive: bool, page_limit: Option<u32>) -> CrawlConfig {
    CrawlConfig {
        page_limit,
        recursive,
        wait: Duration::ZERO,
        help: false,
    }
}

/// Runs a single session against a fresh client
async fn run_session(seed: &str, config: &CrawlConfig, store: &mut PageStore) -> CrawlReport {
    let client = build_http_client().expect("client should build");
    CrawlSession::new(seed, &client, store, config).run().await
}

/// Mounts an HTML page at the given route
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.to_string(), "text/html")
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn saved_files(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[tokio::test]
async fn test_single_page_without_recursion() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#,
    )
    .await;

    // Linked pages must never be requested without -r
    for route in ["/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(false, None), &mut store).await;

    assert_eq!(report.end, SessionEnd::FrontierExhausted);
    assert_eq!(report.attempts, 1);
    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.delays, 0);
    assert_eq!(store.pages_written(), 1);
    assert!(dir.path().join(page_file_name(&seed)).is_file());
}

#[tokio::test]
async fn test_recursive_crawl_visits_whole_site() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#,
    )
    .await;
    // /a points back at pages already seen
    mount_page(
        &server,
        "/a",
        r#"<html><body><a href="/">Home</a><a href="/b">B</a></body></html>"#,
    )
    .await;
    mount_page(&server, "/b", r#"<html><body>Leaf</body></html>"#).await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    assert_eq!(report.end, SessionEnd::FrontierExhausted);
    assert_eq!(report.attempts, 3);
    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.delays, 2);
    assert_eq!(saved_files(&dir), 3);
}

#[tokio::test]
async fn test_duplicate_and_scheme_variant_links_collapse() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());
    let host_port = server.uri().strip_prefix("http://").unwrap().to_string();

    // Three spellings of the same page: absolute path, relative path,
    // and an https URL on the same host and port
    let body = format!(
        r#"<html><body>
        <a href="/a">A</a>
        <a href="a">A again</a>
        <a href="https://{host_port}/a">A via https</a>
        </body></html>"#
    );
    mount_page(&server, "/", &body).await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>A</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    assert_eq!(report.attempts, 2);
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_page_limit_stops_the_crawl() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<html><body><a href="/p1">1</a></body></html>"#).await;
    mount_page(&server, "/p1", r#"<html><body><a href="/p2">2</a></body></html>"#).await;

    // The third page sits queued when the limit hits
    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, Some(2)), &mut store).await;

    assert_eq!(report.end, SessionEnd::LimitReached);
    assert_eq!(report.attempts, 2);
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.delays, 1);
    assert_eq!(saved_files(&dir), 2);
}

#[tokio::test]
async fn test_page_limit_is_inert_without_recursion() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Home</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    // Even a limit of zero does not stop a non-recursive fetch
    let report = run_session(&seed, &test_config(false, Some(0)), &mut store).await;

    assert_eq!(report.end, SessionEnd::FrontierExhausted);
    assert_eq!(report.attempts, 1);
    assert_eq!(report.pages_crawled, 1);
}

#[tokio::test]
async fn test_limit_zero_with_recursion_makes_no_requests() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, Some(0)), &mut store).await;

    assert_eq!(report.end, SessionEnd::LimitReached);
    assert_eq!(report.attempts, 0);
    assert_eq!(store.pages_written(), 0);
}

#[tokio::test]
async fn test_non_html_content_is_skipped() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/doc.pdf">Doc</a><a href="/next">Next</a></body></html>"#,
    )
    .await;
    mount_page(&server, "/next", r#"<html><body>Next</body></html>"#).await;

    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]) // %PDF
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    // The PDF was attempted and paced over, but neither saved nor counted
    assert_eq!(report.attempts, 3);
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.delays, 2);
    assert_eq!(saved_files(&dir), 2);
}

#[tokio::test]
async fn test_failed_fetch_is_recovered() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/missing">Gone</a><a href="/ok">OK</a></body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Still here</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    assert_eq!(report.end, SessionEnd::FrontierExhausted);
    assert_eq!(report.attempts, 3);
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.delays, 2);
}

#[tokio::test]
async fn test_cross_host_links_are_rejected() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    let body = format!(
        r#"<html><body>
        <a href="{}/page">Elsewhere</a>
        <a href="/local">Local</a>
        </body></html>"#,
        other.uri()
    );
    mount_page(&server, "/", &body).await;
    mount_page(&server, "/local", r#"<html><body>Local</body></html>"#).await;

    // The other server differs in port, so its link must be dropped
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&other)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    assert_eq!(report.attempts, 2);
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_redirects_resolve_links_against_final_url() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/home"))
        .mount(&server)
        .await;

    // The relative link "next" must resolve against /home, not /
    mount_page(&server, "/home", r#"<html><body><a href="next">Next</a></body></html>"#).await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Next</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(true, None), &mut store).await;

    assert_eq!(report.attempts, 2);
    assert_eq!(report.pages_crawled, 2);

    // Files are named for the post-redirect URL
    let home_file = page_file_name(&format!("{}/home", server.uri()));
    let seed_file = page_file_name(&seed);
    assert!(dir.path().join(home_file).is_file());
    assert!(!dir.path().join(seed_file).exists());
}

#[tokio::test]
async fn test_saved_page_layout() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());
    let body = "<html><body>hello</body></html>";

    mount_page(&server, "/", body).await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    run_session(&seed, &test_config(false, None), &mut store).await;

    let contents = std::fs::read_to_string(dir.path().join(page_file_name(&seed))).unwrap();
    let mut lines = contents.lines();

    assert_eq!(lines.next(), Some(seed.as_str()));
    assert!(contents.contains("content-type: text/html"));
    assert!(contents.ends_with(body));
}

#[tokio::test]
async fn test_pacing_waits_between_requests() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<html><body><a href="/a">A</a></body></html>"#).await;
    mount_page(&server, "/a", r#"<html><body><a href="/b">B</a></body></html>"#).await;
    mount_page(&server, "/b", r#"<html><body>Leaf</body></html>"#).await;

    let config = CrawlConfig {
        page_limit: None,
        recursive: true,
        wait: Duration::from_millis(50),
        help: false,
    };

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let started = Instant::now();
    let report = run_session(&seed, &config, &mut store).await;
    let elapsed = started.elapsed();

    // Two pauses between three attempts, none after the last
    assert_eq!(report.attempts, 3);
    assert_eq!(report.delays, 2);
    assert!(elapsed >= Duration::from_millis(100), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_requests_carry_the_user_agent() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>UA</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let report = run_session(&seed, &test_config(false, None), &mut store).await;

    assert_eq!(report.attempts, 1);
    assert_eq!(report.pages_crawled, 1);
}

#[tokio::test]
async fn test_seeds_crawl_independently_but_share_the_store() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    // Each session fetches the page again; the store keeps one file
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Home</body></html>", "text/html")
                .insert_header("content-type", "text/html"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut store = PageStore::new(dir.path());
    let seeds = vec![seed.clone(), seed];
    let reports = crawl(&seeds, &test_config(false, None), &mut store)
        .await
        .unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].attempts, 1);
    assert_eq!(reports[1].attempts, 1);
    assert_eq!(store.pages_written(), 1);
    assert_eq!(saved_files(&dir), 1);
}
