//! Integration tests for the pathcraft-web server.
//!
//! These tests start a real axum server on a random port and exercise the
//! endpoints with reqwest. None of them contact the DeepSeek API: the
//! `/generate` tests use the empty-subject short-circuit, and the export
//! endpoint never touches the upstream at all.

use std::sync::Arc;

use pathcraft::DeepSeekClient;
use pathcraft::stream::EMPTY_SUBJECT_MESSAGE;
use pathcraft_web::{WebConfig, spawn_web};

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server() -> String {
    let client = Arc::new(DeepSeekClient::new("sk-test").unwrap());
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(client, config).await;
    format!("http://{addr}")
}

// ── UI ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_the_ui_page() {
    let base = spawn_test_server().await;

    let resp = reqwest::get(&base).await.unwrap();
    assert_eq!(resp.status(), 200);

    let html = resp.text().await.unwrap();
    assert!(html.contains("职业学习路径生成器"));
    assert!(html.contains("generateForm"));
}

// ── Streaming relay ──────────────────────────────────────────────────

#[tokio::test]
async fn generate_with_empty_profession_streams_validation_message() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/generate"))
        .json(&serde_json::json!({"profession": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    // The whole stream is the single validation fragment, no envelope.
    let body = resp.text().await.unwrap();
    assert_eq!(body, EMPTY_SUBJECT_MESSAGE);
}

#[tokio::test]
async fn generate_with_whitespace_profession_streams_validation_message() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/generate"))
        .json(&serde_json::json!({"profession": "   "}))
        .send()
        .await
        .unwrap();

    let body = resp.text().await.unwrap();
    assert_eq!(body, EMPTY_SUBJECT_MESSAGE);
}

#[tokio::test]
async fn generate_rejects_non_json_body() {
    let base = spawn_test_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/generate"))
        .body("profession=plain")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

// ── Tabular export ───────────────────────────────────────────────────

#[tokio::test]
async fn download_excel_returns_xlsx_attachment() {
    let base = spawn_test_server().await;

    let content = "## 自学模块\n- 阅读《Rust 程序设计》\n| 知识点 | 说明 |\n";
    let resp = reqwest::Client::new()
        .get(format!("{base}/download_excel"))
        .query(&[("profession", "软件工程师"), ("content", content)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let disposition = resp.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename*=UTF-8''"));

    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("spreadsheetml"));

    // xlsx is a zip container.
    let bytes = resp.bytes().await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn download_excel_defaults_missing_profession() {
    let base = spawn_test_server().await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/download_excel"))
        .query(&[("content", "- 条目\n")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // 未知职业, percent-encoded in the RFC 5987 filename.
    let disposition = resp.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("%E6%9C%AA%E7%9F%A5%E8%81%8C%E4%B8%9A"));
}

#[tokio::test]
async fn download_excel_tolerates_malformed_markdown() {
    let base = spawn_test_server().await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/download_excel"))
        .query(&[("profession", "x"), ("content", "no structure here\n```\n")])
        .send()
        .await
        .unwrap();

    // Degrades to an empty table, never an error.
    assert_eq!(resp.status(), 200);
    let bytes = resp.bytes().await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}
