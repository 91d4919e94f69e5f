//! Fetcher retry behaviour over real HTTP

use route_sounder::config::FetcherConfig;
use route_sounder::crawler::{FetchResult, Fetcher, ReqwestTransport};
use route_sounder::progress::NullSink;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(max_attempts: u32) -> Fetcher {
    let config = FetcherConfig {
        max_attempts,
        retry_delay_ms: 10,
        timeout_secs: 1,
        ..FetcherConfig::default()
    };
    let transport = ReqwestTransport::new(&config, true).expect("client builds");
    Fetcher::new(Arc::new(transport), &config, Arc::new(NullSink))
}

#[tokio::test]
async fn test_timing_out_endpoint_hit_exactly_three_times() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(3)
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
    let result = fetcher(3).fetch(&url).await;

    match result {
        FetchResult::Unreachable { attempts, .. } => assert_eq!(attempts, 3),
        FetchResult::Success(_) => panic!("expected the request to time out"),
    }
}

#[tokio::test]
async fn test_error_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/broken", server.uri())).unwrap();
    let page = fetcher(3).fetch(&url).await.into_page().expect("server answered");

    assert_eq!(page.status_code, 503);
    assert!(!page.is_success());
}

#[tokio::test]
async fn test_redirects_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/old", server.uri())).unwrap();
    let page = fetcher(1).fetch(&url).await.into_success().expect("redirect followed");

    assert_eq!(page.url, url);
    assert!(page.final_url.ends_with("/new"));
    assert_eq!(page.body, "moved here");
}
