#![allow(dead_code)]

use mixport::http::{create_http_client, ApiClient, Credentials, HttpClientConfig};
use mixport::{DownloaderBuilder, ExportJobRunner, ExportPreferences, PollOptions};
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// Common test constants
pub const TEST_CHARACTER: &str = "353d2bdd-d15a-4d39-8a12-4d92911f537e";
pub const TEST_TOKEN: &str = "test-token";
pub const TEST_RESULT_URL: &str = "https://cdn.example.com/exports/Samba%20Dancing.fbx";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

// === Wire payloads ===

/// Catalog listing body for `page` with one result per id.
pub fn product_list(page: u32, num_pages: u32, ids: &[&str]) -> Value {
    let results: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "description": format!("Animation {}", id), "type": "Motion"}))
        .collect();
    json!({
        "results": results,
        "pagination": {"page": page, "num_pages": num_pages, "limit": 96}
    })
}

/// Product details body with a two parameter `gms_hash`.
pub fn product_details(description: &str) -> Value {
    json!({
        "description": description,
        "details": {
            "gms_hash": {
                "model-id": 103120902,
                "mirror": false,
                "trim": [0, 100],
                "overdrive": 0,
                "arm-space": 0,
                "inplace": false,
                "params": [["Overdrive", 1], ["Character Arm-Space", 2]]
            }
        }
    })
}

pub fn monitor_body(status: &str) -> Value {
    match status {
        "completed" => json!({"status": "completed", "job_result": TEST_RESULT_URL, "message": "done"}),
        other => json!({"status": other, "job_result": null, "message": format!("job is {}", other)}),
    }
}

pub fn monitor_path() -> String {
    format!("/characters/{}/monitor", TEST_CHARACTER)
}

// === Mock mounting helpers ===

/// Mount a catalog page.
pub async fn mount_page(server: &MockServer, page: u32, num_pages: u32, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_list(page, num_pages, ids)))
        .mount(server)
        .await;
}

/// Mount the product details of `id`.
pub async fn mount_product(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{}", id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_details(&format!("Animation {}", id))),
        )
        .mount(server)
        .await;
}

/// Mount an export endpoint accepting every job.
pub async fn mount_export(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/animations/export"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"status": "processing"})))
        .mount(server)
        .await;
}

/// Mount a monitor answering `body` with `status_code`, at most `times` times.
pub async fn mount_monitor_once(server: &MockServer, status_code: u16, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(monitor_path()))
        .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

/// Mount a monitor that always reports a completed job.
pub async fn mount_monitor_completed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(monitor_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(monitor_body("completed")))
        .mount(server)
        .await;
}

/// Mount product details for every id, the export endpoint and a completed monitor.
pub async fn mount_happy_exports(server: &MockServer, ids: &[&str]) {
    for id in ids {
        mount_product(server, id).await;
    }
    mount_export(server).await;
    mount_monitor_completed(server).await;
}

// === Request inspection ===

pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// Catalog pages requested, in request order.
pub async fn requested_pages(server: &MockServer) -> Vec<u32> {
    received(server)
        .await
        .iter()
        .filter(|r| r.url.path() == "/products")
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
        })
        .collect()
}

/// Product ids looked up, in request order.
pub async fn requested_products(server: &MockServer) -> Vec<String> {
    received(server)
        .await
        .iter()
        .filter_map(|r| r.url.path().strip_prefix("/products/").map(String::from))
        .collect()
}

pub async fn count_requests(server: &MockServer, request_path: &str) -> usize {
    received(server)
        .await
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

// === Client helpers ===

/// API client pointed at the mock server.
pub fn create_test_api(server: &MockServer) -> ApiClient {
    let client = create_http_client(HttpClientConfig::default()).expect("Failed to create client");
    ApiClient::new(
        client,
        Url::parse(&server.uri()).expect("Invalid server uri"),
        Credentials::new(TEST_TOKEN),
    )
    .expect("Failed to create api client")
}

pub fn create_test_runner(server: &MockServer, poll: PollOptions) -> ExportJobRunner {
    ExportJobRunner::new(create_test_api(server), ExportPreferences::default(), poll)
}

/// Downloader builder pointed at the mock server, without bars nor cooldown.
pub fn create_test_downloader_builder(server: &MockServer) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .character(TEST_CHARACTER)
        .token(TEST_TOKEN)
        .base_url(server.uri())
        .cooldown(Duration::ZERO)
}
