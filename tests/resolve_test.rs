//! End-to-end resolution against a mock delivery API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

use route_resolver::config::ServerConfig;
use route_resolver::{CmsClient, HttpServer, RoutePipeline, Shutdown};

mod common;

fn pipeline_for(cms: &common::MockCms) -> RoutePipeline {
    let client = CmsClient::new(&cms.cms_config()).expect("client");
    RoutePipeline::new(Arc::new(client))
}

#[tokio::test]
async fn test_resolves_blog_route() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    let route = pipeline.resolve("/blog/ai").await.expect("route");
    assert_eq!(route.content.title.as_deref(), Some("AI"));
    assert_eq!(route.content.body.as_deref(), Some("<p>Artificial</p>"));
    assert_eq!(route.content.field("author"), Some(&Value::from("Ada")));
    assert_eq!(route.content_type_id, "blog");
    assert_eq!(route.template.as_deref(), Some("blog"));

    assert_eq!(cms.hits(), vec!["find routing /blog/ai", "fetch blog e1"]);
}

#[tokio::test]
async fn test_bare_path_entry_and_alternate_id_field() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    let route = pipeline.resolve("about").await.expect("route");
    assert_eq!(route.content.title.as_deref(), Some("About"));
    assert_eq!(route.template, None);

    assert_eq!(
        cms.hits(),
        vec!["find routing /about", "find routing about", "fetch page p1"]
    );
}

#[tokio::test]
async fn test_missing_route_never_fetches_content() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    assert!(pipeline.resolve("/missing").await.is_none());
    assert_eq!(cms.hits(), vec!["find routing /missing", "find routing missing"]);
}

#[tokio::test]
async fn test_incomplete_route_never_fetches_content() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    assert!(pipeline.resolve("/half").await.is_none());
    assert_eq!(cms.fetches(), 0);
}

#[tokio::test]
async fn test_deleted_entry_is_not_found() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    assert!(pipeline.resolve("/gone").await.is_none());
    assert_eq!(cms.fetches(), 1);
}

#[tokio::test]
async fn test_malformed_entry_is_not_found() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    assert!(pipeline.resolve("/broken").await.is_none());
}

#[tokio::test]
async fn test_rejected_credentials_are_not_found() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let mut config = cms.cms_config();
    config.delivery_token = "wrong".to_string();
    let pipeline = RoutePipeline::new(Arc::new(CmsClient::new(&config).unwrap()));

    assert!(pipeline.resolve("/blog/ai").await.is_none());
    assert!(cms.hits().is_empty());
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let cms =
        common::start_mock_cms_with_delay(common::fixtures(), Some(Duration::from_secs(3))).await;
    let mut config = cms.cms_config();
    config.request_timeout_secs = 1;
    let pipeline = RoutePipeline::new(Arc::new(CmsClient::new(&config).unwrap()));

    let result = tokio::time::timeout(Duration::from_secs(5), pipeline.resolve("/blog/ai"))
        .await
        .expect("resolution should not hang");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_repeated_resolution_is_stable() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let pipeline = pipeline_for(&cms);

    let first = pipeline.resolve("/blog/ai").await;
    let second = pipeline.resolve("blog/ai").await;
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_http_server_end_to_end() {
    let cms = common::start_mock_cms(common::fixtures()).await;
    let server = HttpServer::new(ServerConfig::default(), pipeline_for(&cms));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/blog/ai", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["template"], "blog");
    assert_eq!(body["route"]["content"]["title"], "AI");

    let res = client
        .get(format!("http://{}/missing", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}
