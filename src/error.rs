// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::risk::RiskLevel;

pub const OCR_FAILED_REASON: &str = "OCR failed";
pub const NO_IMAGE_MESSAGE: &str = "No image uploaded";
pub const UPLOAD_TOO_LARGE_REASON: &str = "Image too large";

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("failed to stage image for OCR: {0}")]
    Staging(#[from] std::io::Error),

    #[error("failed to launch OCR engine {path}: {reason}")]
    Launch { path: PathBuf, reason: String },

    #[error("OCR engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },

    #[error("OCR engine timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{}", source_chain(.0))]
    Request(#[from] reqwest::Error),
}

/// `err` followed by each of its causes, joined with `": "`. A cause whose
/// text already appears earlier in the chain is skipped.
pub fn source_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let text = e.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = e.source();
    }
    message
}

/// Failures a request handler reports to the client as-is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No image uploaded")]
    MissingImage,

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("uploaded image is too large: {detail}")]
    UploadTooLarge { detail: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingImage => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": NO_IMAGE_MESSAGE })),
            )
                .into_response(),
            ApiError::Ocr(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "riskLevel": RiskLevel::Medium,
                    "reason": OCR_FAILED_REASON,
                    "error": e.to_string(),
                })),
            )
                .into_response(),
            ApiError::UploadTooLarge { detail } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({
                    "riskLevel": RiskLevel::Medium,
                    "reason": UPLOAD_TOO_LARGE_REASON,
                    "error": detail,
                })),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("invalid listen address {host}:{port}")]
    Address { host: String, port: u16 },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub type ServerResult<T> = std::result::Result<T, ServerError>;
