// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use riskscan::config::ConfigParameter;
use riskscan::error::{FetchError, OcrError};
use riskscan::fetch::{HttpFetcher, PageFetcher};
use riskscan::handlers::AppState;
use riskscan::history::HistoryStore;
use riskscan::ocr::TextExtractor;
use riskscan::server;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::ResponseTemplate;

pub const BOUNDARY: &str = "riskscan-test-boundary";
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/";

/// OCR stand-in that returns canned text or a canned engine failure.
pub struct FakeOcr {
    outcome: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeOcr {
    pub fn text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            outcome: Err(stderr.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for FakeOcr {
    fn extract_text<'a>(&'a self, _image: &'a [u8]) -> BoxFuture<'a, Result<String, OcrError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone().map_err(|stderr| OcrError::Engine {
            status: "exit status: 1".to_string(),
            stderr,
        });
        Box::pin(async move { outcome })
    }
}

/// Fetcher that serves the same page for every URL.
pub struct StaticPage(pub String);

impl PageFetcher for StaticPage {
    fn fetch<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        let body = self.0.clone();
        Box::pin(async move { Ok(body) })
    }
}

pub struct TestApp {
    pub router: Router,
    pub history: Arc<HistoryStore>,
    pub assets: TempDir,
}

impl TestApp {
    pub fn new(ocr: Arc<dyn TextExtractor>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_config(ocr, fetcher, ConfigParameter::new())
    }

    /// App whose screenshot route accepts at most `limit` body bytes.
    pub fn with_upload_limit(ocr: Arc<dyn TextExtractor>, limit: usize) -> Self {
        let mut config = ConfigParameter::new();
        config.set_max_upload_bytes(limit);
        Self::with_config(ocr, Arc::new(StaticPage(String::new())), config)
    }

    pub fn with_config(
        ocr: Arc<dyn TextExtractor>,
        fetcher: Arc<dyn PageFetcher>,
        mut config: ConfigParameter,
    ) -> Self {
        let assets = TempDir::new().unwrap();
        std::fs::write(
            assets.path().join("index.html"),
            "<html><body>riskscan</body></html>",
        )
        .unwrap();
        std::fs::write(assets.path().join("script.js"), "console.log('hi');").unwrap();

        config.set_static_dir(assets.path().to_path_buf());

        let history = Arc::new(HistoryStore::new());
        let state = AppState::new(Arc::clone(&history), ocr, fetcher);

        Self {
            router: server::router(state, &config),
            history,
            assets,
        }
    }

    pub fn with_page(body: &str) -> Self {
        Self::new(
            Arc::new(FakeOcr::text("")),
            Arc::new(StaticPage(body.to_string())),
        )
    }

    pub fn with_real_fetcher(timeout_secs: u64) -> Self {
        Self::new(
            Arc::new(FakeOcr::text("")),
            Arc::new(HttpFetcher::new(timeout_secs).unwrap()),
        )
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn json_post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// One multipart part: field name, optional filename, payload.
pub fn multipart_post(uri: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn create_html_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(content)
        .append_header("content-type", "text/html")
}
