// File: handlers.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ConfigParameter;
use crate::error::{ApiError, FetchError};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::history::{HistoryStore, RiskStats, ScanRecord, ScanType};
use crate::ocr::{TesseractOcr, TextExtractor};
use crate::risk::{classify_text, classify_website_content, unreachable_site, Verdict};

pub const IMAGE_FIELD: &str = "image";

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    history: Arc<HistoryStore>,
    ocr: Arc<dyn TextExtractor>,
    fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(
        history: Arc<HistoryStore>,
        ocr: Arc<dyn TextExtractor>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            history,
            ocr,
            fetcher,
        }
    }

    /// State wired to the Tesseract binary and a reqwest client, with an empty history.
    pub fn from_config(config: &ConfigParameter) -> Result<Self, FetchError> {
        let ocr = TesseractOcr::new(config.tesseract_cmd().to_path_buf(), config.ocr_timeout());
        let fetcher = HttpFetcher::new(config.fetch_timeout())?;
        Ok(Self::new(
            Arc::new(HistoryStore::new()),
            Arc::new(ocr),
            Arc::new(fetcher),
        ))
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebsiteRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotResponse {
    pub extracted_text: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

// Bodies are read regardless of Content-Type; anything unreadable or
// unparsable counts as an empty request.
fn parse_lenient<T: DeserializeOwned + Default>(body: Result<Bytes, BytesRejection>) -> T {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Treating unreadable request body as empty: {}", rejection);
            return T::default();
        }
    };
    match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Treating unparsable request body as empty: {}", e);
            T::default()
        }
    }
}

pub async fn analyze_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Verdict> {
    let request: TextRequest = parse_lenient(body);
    let verdict = classify_text(&request.text);

    info!("Text scan rated {}: {}", verdict.risk_level, verdict.reason);
    state
        .history
        .append(ScanRecord::for_text(&request.text, verdict.risk_level));

    Json(verdict)
}

struct Upload {
    file_name: String,
    data: Bytes,
}

// An over-limit body surfaces as a multipart error while streaming.
fn upload_error(e: MultipartError) -> Option<ApiError> {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Rejecting oversized upload: {}", e);
        Some(ApiError::UploadTooLarge {
            detail: e.body_text(),
        })
    } else {
        warn!("Malformed multipart body: {}", e);
        None
    }
}

// Only a part named `image` that carries a filename counts as an upload.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::MissingImage),
            Err(e) => return Err(upload_error(e).unwrap_or(ApiError::MissingImage)),
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Skipping '{}' part without a filename", IMAGE_FIELD);
            continue;
        };

        return match field.bytes().await {
            Ok(data) => Ok(Upload { file_name, data }),
            Err(e) => {
                warn!("Failed to read uploaded image {}", file_name);
                Err(upload_error(e).unwrap_or(ApiError::MissingImage))
            }
        };
    }
}

pub async fn analyze_screenshot(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScreenshotResponse>, ApiError> {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(rejection) => {
            debug!("Screenshot request is not multipart: {}", rejection);
            return Err(ApiError::MissingImage);
        }
    };

    let extracted_text = state.ocr.extract_text(&upload.data).await.map_err(|e| {
        warn!("OCR failed for {}: {}", upload.file_name, e);
        ApiError::Ocr(e)
    })?;

    let verdict = classify_text(&extracted_text);
    info!(
        "Screenshot scan of {} rated {}: {}",
        upload.file_name, verdict.risk_level, verdict.reason
    );
    state.history.append(ScanRecord::new(
        ScanType::Screenshot,
        upload.file_name,
        verdict.risk_level,
    ));

    Ok(Json(ScreenshotResponse {
        extracted_text,
        verdict,
    }))
}

pub async fn analyze_website(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<Verdict> {
    let request: WebsiteRequest = parse_lenient(body);

    let verdict = match state.fetcher.fetch(&request.url).await {
        Ok(page) => classify_website_content(&page),
        Err(e) => unreachable_site(&e.to_string()),
    };

    info!(
        "Website scan of {} rated {}: {}",
        request.url, verdict.risk_level, verdict.reason
    );
    state.history.append(ScanRecord::new(
        ScanType::Website,
        request.url,
        verdict.risk_level,
    ));

    Json(verdict)
}

pub async fn history(State(state): State<AppState>) -> Json<Vec<ScanRecord>> {
    Json(state.history.all())
}

pub async fn stats(State(state): State<AppState>) -> Json<RiskStats> {
    Json(state.history.stats())
}
