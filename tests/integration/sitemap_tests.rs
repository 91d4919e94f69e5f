//! Sitemap resolution against live mock servers

use route_sounder::config::FetcherConfig;
use route_sounder::crawler::{Fetcher, ReqwestTransport};
use route_sounder::progress::NullSink;
use route_sounder::sitemap::SitemapResolver;
use route_sounder::state::VisitedSet;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    let config = FetcherConfig {
        max_attempts: 1,
        retry_delay_ms: 0,
        timeout_secs: 5,
        ..FetcherConfig::default()
    };
    let transport = ReqwestTransport::new(&config, true).expect("client builds");
    Fetcher::new(Arc::new(transport), &config, Arc::new(NullSink))
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn base(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).unwrap()
}

#[tokio::test]
async fn test_probe_finds_conventional_location() {
    let server = MockServer::start().await;
    mount_xml(&server, "/wp-sitemap.xml", "<urlset></urlset>".to_string()).await;

    let fetcher = fetcher();
    let found = SitemapResolver::new(&fetcher)
        .discover_sitemap(&base(&server))
        .await;

    assert_eq!(found.map(|u| u.path().to_string()), Some("/wp-sitemap.xml".to_string()));
}

#[tokio::test]
async fn test_html_answer_is_not_a_sitemap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<!doctype html><html>soft 404</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let found = SitemapResolver::new(&fetcher)
        .discover_sitemap(&base(&server))
        .await;

    assert!(found.is_none());
}

#[tokio::test]
async fn test_nested_index_flattened() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<sitemapindex>
  <sitemap><loc>{uri}/posts.xml</loc></sitemap>
  <sitemap><loc>{uri}/pages.xml</loc></sitemap>
</sitemapindex>"#
        ),
    )
    .await;
    mount_xml(
        &server,
        "/posts.xml",
        format!(r#"<urlset><url><loc>{uri}/posts/1</loc></url></urlset>"#),
    )
    .await;
    mount_xml(
        &server,
        "/pages.xml",
        format!(r#"<urlset><url><loc>{uri}/about</loc></url></urlset>"#),
    )
    .await;

    let fetcher = fetcher();
    let sitemap = Url::parse(&format!("{uri}/sitemap.xml")).unwrap();
    let urls = SitemapResolver::new(&fetcher).collect(&sitemap).await;

    assert_eq!(urls, vec![format!("{uri}/posts/1"), format!("{uri}/about")]);
}

#[tokio::test]
async fn test_cyclic_index_terminates() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/index.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<sitemapindex>
  <sitemap><loc>{uri}/index.xml</loc></sitemap>
  <sitemap><loc>{uri}/leaf.xml</loc></sitemap>
</sitemapindex>"#
                ))
                .insert_header("content-type", "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leaf.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    r#"<sitemapindex><sitemap><loc>{uri}/index.xml</loc></sitemap></sitemapindex>
"#
                ))
                .insert_header("content-type", "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let sitemap = Url::parse(&format!("{uri}/index.xml")).unwrap();
    let mut visited = VisitedSet::new();
    let urls = SitemapResolver::new(&fetcher)
        .parse_sitemap(&sitemap, &mut visited)
        .await;

    assert!(urls.is_empty());
    assert_eq!(visited.len(), 2);
}

#[tokio::test]
async fn test_already_visited_sitemap_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let sitemap = Url::parse(&format!("{}/sitemap.xml", server.uri())).unwrap();
    let mut visited = VisitedSet::new();
    visited.insert(sitemap.to_string());

    let urls = SitemapResolver::new(&fetcher)
        .parse_sitemap(&sitemap, &mut visited)
        .await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_malformed_sitemap_falls_back_to_pattern() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            "<urlset><url><loc>{uri}/recovered</loc></uri>\n<url><loc>{uri}/also</loc></url>"
        ),
    )
    .await;

    let fetcher = fetcher();
    let sitemap = Url::parse(&format!("{uri}/sitemap.xml")).unwrap();
    let urls = SitemapResolver::new(&fetcher).collect(&sitemap).await;

    assert_eq!(urls, vec![format!("{uri}/recovered"), format!("{uri}/also")]);
}

#[tokio::test]
async fn test_missing_child_sitemap_skipped() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<sitemapindex>
  <sitemap><loc>{uri}/gone.xml</loc></sitemap>
  <sitemap><loc>{uri}/here.xml</loc></sitemap>
</sitemapindex>"#
        ),
    )
    .await;
    mount_xml(
        &server,
        "/here.xml",
        format!(r#"<urlset><url><loc>{uri}/kept</loc></url></urlset>"#),
    )
    .await;

    let fetcher = fetcher();
    let sitemap = Url::parse(&format!("{uri}/sitemap.xml")).unwrap();
    let urls = SitemapResolver::new(&fetcher).collect(&sitemap).await;

    assert_eq!(urls, vec![format!("{uri}/kept")]);
}

#[tokio::test]
async fn test_relative_robots_sitemap_resolved_from_origin_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Sitemap: maps/main.xml\n"))
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let app = Url::parse(&format!("{}/app/", server.uri())).unwrap();
    let found = SitemapResolver::new(&fetcher).discover_sitemap(&app).await;

    assert_eq!(found.map(|u| u.path().to_string()), Some("/maps/main.xml".to_string()));
}

#[tokio::test]
async fn test_probe_order_first_match_wins() {
    let server = MockServer::start().await;
    mount_xml(&server, "/sitemap.xml", "<urlset></urlset>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/wp-sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<urlset></urlset>")
                .insert_header("content-type", "application/xml"),
        )
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = fetcher();
    let found = SitemapResolver::new(&fetcher)
        .discover_sitemap(&base(&server))
        .await;

    assert_eq!(found.map(|u| u.path().to_string()), Some("/sitemap.xml".to_string()));
}
