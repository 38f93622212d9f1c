//! Tests for the export job runner: export request and monitor polling.

use mixport::http::{create_http_client, ApiClient, Credentials, HttpClientConfig};
use mixport::{Error, ExportJobRunner, ExportPreferences, PollOptions};
use reqwest::Url;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn unbounded() -> PollOptions {
    PollOptions::default()
}

// === request_export ===

#[tokio::test]
async fn test_request_export_posts_flattened_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/a1"))
        .and(query_param("similar", "0"))
        .and(query_param("character_id", TEST_CHARACTER))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_details("Samba Dancing")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/animations/export"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("x-api-key", "mixamo2"))
        .and(body_partial_json(json!({
            "character_id": TEST_CHARACTER,
            "gms_hash": [{"model-id": 103120902, "params": "1,2", "trim": [0, 100]}],
            "preferences": {"format": "fbx7_2019", "skin": "true", "fps": "30", "reducekf": "0"},
            "product_name": "Samba Dancing",
            "type": "Motion"
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"uuid": "job-1", "status": "processing"})))
        .expect(1)
        .mount(&server)
        .await;

    let runner = create_test_runner(&server, unbounded());
    let animation = mixport::AnimationDescriptor::new("a1", "Samba");
    let job = runner.request_export(TEST_CHARACTER, &animation).await.unwrap();

    assert_eq!(job.character_id, TEST_CHARACTER);
    assert_eq!(job.response["uuid"], json!("job-1"));
}

#[tokio::test]
async fn test_request_export_unknown_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let runner = create_test_runner(&server, unbounded());
    let animation = mixport::AnimationDescriptor::new("missing", "Gone");
    let err = runner.request_export(TEST_CHARACTER, &animation).await.unwrap_err();

    assert!(matches!(err, Error::ExportRequest(_)), "unexpected error: {:?}", err);
    assert!(!err.is_fatal());
    assert_eq!(count_requests(&server, "/animations/export").await, 0);
}

#[tokio::test]
async fn test_request_export_non_json_response() {
    let server = MockServer::start().await;
    mount_product(&server, "a1").await;
    Mock::given(method("POST"))
        .and(path("/animations/export"))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .mount(&server)
        .await;

    let runner = create_test_runner(&server, unbounded());
    let animation = mixport::AnimationDescriptor::new("a1", "Idle");
    assert!(matches!(
        runner.request_export(TEST_CHARACTER, &animation).await,
        Err(Error::ExportRequest(_))
    ));
}

#[tokio::test]
async fn test_request_export_malformed_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "Broken",
            "details": {"gms_hash": {"params": [["only-a-name"]]}}
        })))
        .mount(&server)
        .await;
    mount_export(&server).await;

    let runner = create_test_runner(&server, unbounded());
    let animation = mixport::AnimationDescriptor::new("a1", "Broken");
    assert!(matches!(
        runner.request_export(TEST_CHARACTER, &animation).await,
        Err(Error::ExportRequest(_))
    ));
    assert_eq!(count_requests(&server, "/animations/export").await, 0);
}

// === poll_until_terminal ===

#[tokio::test]
async fn test_poll_returns_url_after_processing() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 202, monitor_body("processing"), 2).await;
    mount_monitor_completed(&server).await;

    let runner = create_test_runner(&server, unbounded());
    let url = runner.poll_until_terminal(TEST_CHARACTER).await.unwrap();

    assert_eq!(url, TEST_RESULT_URL);
    assert_eq!(count_requests(&server, &monitor_path()).await, 3);
}

#[tokio::test]
async fn test_poll_failed_job() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 200, monitor_body("failed"), 1).await;

    let runner = create_test_runner(&server, unbounded());
    let err = runner.poll_until_terminal(TEST_CHARACTER).await.unwrap_err();

    match err {
        Error::JobFailed { status, message } => {
            assert_eq!(status, "failed");
            assert_eq!(message, "job is failed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(count_requests(&server, &monitor_path()).await, 1);
}

#[tokio::test]
async fn test_poll_unrecognized_status_fails_job() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 200, monitor_body("cancelled"), 1).await;

    let runner = create_test_runner(&server, unbounded());
    assert!(matches!(
        runner.poll_until_terminal(TEST_CHARACTER).await,
        Err(Error::JobFailed { status, .. }) if status == "cancelled"
    ));
}

#[tokio::test]
async fn test_poll_completed_without_result() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 200, json!({"status": "completed"}), 1).await;

    let runner = create_test_runner(&server, unbounded());
    assert!(matches!(
        runner.poll_until_terminal(TEST_CHARACTER).await,
        Err(Error::JobFailed { .. })
    ));
}

#[tokio::test]
async fn test_poll_not_found() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 404, json!({"error": "not found"}), 1).await;

    let runner = create_test_runner(&server, unbounded());
    match runner.poll_until_terminal(TEST_CHARACTER).await {
        Err(Error::MonitorNotFound { character_id }) => assert_eq!(character_id, TEST_CHARACTER),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_poll_unhandled_status_code() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 500, json!({}), 1).await;

    let runner = create_test_runner(&server, unbounded());
    assert!(matches!(
        runner.poll_until_terminal(TEST_CHARACTER).await,
        Err(Error::UnhandledResponse { status, .. }) if status.as_u16() == 500
    ));
    assert_eq!(count_requests(&server, &monitor_path()).await, 1);
}

#[tokio::test]
async fn test_poll_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(monitor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
        .mount(&server)
        .await;

    let runner = create_test_runner(&server, unbounded());
    assert!(matches!(
        runner.poll_until_terminal(TEST_CHARACTER).await,
        Err(Error::UnhandledResponse { .. })
    ));
}

#[tokio::test]
async fn test_poll_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(monitor_path()))
        .respond_with(ResponseTemplate::new(202).set_body_json(monitor_body("processing")))
        .mount(&server)
        .await;

    let runner = create_test_runner(
        &server,
        PollOptions {
            interval: Duration::ZERO,
            max_attempts: Some(4),
        },
    );
    assert!(matches!(
        runner.poll_until_terminal(TEST_CHARACTER).await,
        Err(Error::PollLimitExceeded(4))
    ));
    assert_eq!(count_requests(&server, &monitor_path()).await, 4);
}

#[tokio::test]
async fn test_poll_interval_between_polls() {
    let server = MockServer::start().await;
    mount_monitor_once(&server, 202, monitor_body("processing"), 2).await;
    mount_monitor_completed(&server).await;

    let runner = create_test_runner(
        &server,
        PollOptions {
            interval: Duration::from_millis(50),
            max_attempts: None,
        },
    );
    let started = Instant::now();
    runner.poll_until_terminal(TEST_CHARACTER).await.unwrap();

    // Two pauses: before the second and the third poll.
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_poll_unreachable_monitor_is_not_fatal() {
    let client = create_http_client(HttpClientConfig::default()).unwrap();
    let api = ApiClient::new(
        client,
        Url::parse("http://127.0.0.1:1/").unwrap(),
        Credentials::new(TEST_TOKEN),
    )
    .unwrap();
    let runner = ExportJobRunner::new(api, ExportPreferences::default(), unbounded());

    let err = runner.poll_until_terminal(TEST_CHARACTER).await.unwrap_err();

    assert!(matches!(err, Error::MonitorTransport(_)), "unexpected error: {:?}", err);
    assert!(!err.is_fatal());
}

// === export ===

#[tokio::test]
async fn test_export_chains_both_phases() {
    let server = MockServer::start().await;
    mount_happy_exports(&server, &["a1"]).await;

    let runner = create_test_runner(&server, unbounded());
    let animation = mixport::AnimationDescriptor::new("a1", "Idle");
    let url = runner.export(TEST_CHARACTER, &animation).await.unwrap();

    assert_eq!(url, TEST_RESULT_URL);
    let paths: Vec<String> = received(&server)
        .await
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["/products/a1".to_string(), "/animations/export".to_string(), monitor_path()]
    );
}
