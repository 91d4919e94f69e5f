//! End-to-end discovery runs
//!
//! These tests use wiremock to stand up a fake application and check the
//! endpoint set the coordinator reports for it.

use route_sounder::config::Config;
use route_sounder::progress::NullSink;
use route_sounder::{parse_base_url, Coordinator, DiscoveryPhase, EndpointSource};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config tuned for fast local tests
fn test_config() -> Config {
    let mut config = Config::default();
    config.discovery.politeness_delay_ms = 0;
    config.fetcher.max_attempts = 1;
    config.fetcher.retry_delay_ms = 0;
    config.fetcher.timeout_secs = 5;
    config
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn discover(server: &MockServer, config: Config) -> route_sounder::DiscoveryReport {
    let base_url = parse_base_url(&server.uri()).expect("mock server URI parses");
    let mut coordinator =
        Coordinator::new(config, Arc::new(NullSink)).expect("coordinator builds");
    let report = coordinator.run(&base_url).await.expect("discovery runs");
    assert_eq!(coordinator.phase(), DiscoveryPhase::Done);
    report
}

#[tokio::test]
async fn test_sitemap_from_robots() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("User-agent: *\nAllow: /\nSitemap: {}/site-map.xml\n", uri)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site-map.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{uri}/a</loc></url>
  <url><loc>{uri}/b/c</loc></url>
</urlset>"#
                ))
                .insert_header("content-type", "application/xml"),
        )
        .mount(&server)
        .await;

    // The homepage must not be crawled when the sitemap answers
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = discover(&server, test_config()).await;

    assert_eq!(report.source, EndpointSource::Sitemap);
    let endpoints: Vec<&str> = report.endpoints.iter().map(String::as_str).collect();
    assert_eq!(endpoints, vec!["/a", "/b", "/b/c"]);
}

#[tokio::test]
async fn test_crawl_fallback_with_inline_routes() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/dashboard">Dashboard</a>
            <script>const routes = [{ path: "/settings", component: Settings }];</script>
        </body></html>"#,
    )
    .await;

    let report = discover(&server, test_config()).await;

    assert_eq!(report.source, EndpointSource::Crawl);
    assert!(report.endpoints.contains("/dashboard"));
    assert!(report.endpoints.contains("/settings"));
    assert!(report.endpoints.contains("/"));
}

#[tokio::test]
async fn test_routes_from_same_origin_script() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><head><script src="/static/main.js"></script></head><body></body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/static/main.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("async function load(){ return fetch('/api/users?x=1'); }")
                .insert_header("content-type", "application/javascript"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = discover(&server, test_config()).await;

    assert!(report.endpoints.contains("/api/users"));
    assert!(report.endpoints.contains("/api"));
    assert!(!report.endpoints.iter().any(|e| e.contains('?')));
}

#[tokio::test]
async fn test_only_answering_seeds_reported() {
    let server = MockServer::start().await;

    mount_html(&server, "/", "<html><body>home</body></html>").await;
    mount_html(&server, "/login", "<html><body>login</body></html>").await;

    let report = discover(&server, test_config()).await;

    assert!(report.endpoints.contains("/login"));
    assert!(!report.endpoints.contains("/audit"));
    assert!(!report.endpoints.contains("/users"));
}

#[tokio::test]
async fn test_configured_seed_scanned() {
    let server = MockServer::start().await;

    mount_html(&server, "/reports", r#"<a href="/reports/weekly">weekly</a>"#).await;

    let mut config = test_config();
    config.discovery.seeds = vec!["/reports".to_string()];
    let report = discover(&server, config).await;

    assert!(report.endpoints.contains("/reports"));
    assert!(report.endpoints.contains("/reports/weekly"));
}

#[tokio::test]
async fn test_respect_robots_keeps_off_disallowed_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"))
        .mount(&server)
        .await;

    mount_html(&server, "/", r#"<a href="/private/area">p</a><a href="/public">o</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/private/area"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.discovery.respect_robots = true;
    let report = discover(&server, config).await;

    // Still reported as a discovered link, just never fetched
    assert!(report.endpoints.contains("/private/area"));
}

#[tokio::test]
async fn test_cross_origin_links_excluded() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<a href="https://elsewhere.example.org/outside">x</a><a href="/inside">y</a>"#,
    )
    .await;

    let report = discover(&server, test_config()).await;

    assert!(report.endpoints.contains("/inside"));
    assert!(!report.endpoints.contains("/outside"));
    assert!(report.endpoints.iter().all(|e| e.starts_with('/')));
}
