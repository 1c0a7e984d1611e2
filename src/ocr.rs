// File: ocr.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::future::BoxFuture;
use log::{debug, error, info};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::OcrError;

/// Turns an uploaded image into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text<'a>(&'a self, image: &'a [u8]) -> BoxFuture<'a, Result<String, OcrError>>;
}

/// Runs the `tesseract` command line tool on a staged copy of the image.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: PathBuf,
    timeout_secs: u64,
}

impl TesseractOcr {
    pub fn new(command: PathBuf, timeout_secs: u64) -> Self {
        Self {
            command,
            timeout_secs,
        }
    }

    async fn run(&self, image: &[u8]) -> Result<String, OcrError> {
        let staged = tokio::task::spawn_blocking(|| {
            tempfile::Builder::new()
                .prefix("riskscan-upload-")
                .tempfile()
        })
        .await
        .map_err(std::io::Error::other)??;
        tokio::fs::write(staged.path(), image).await?;

        debug!(
            "Running {} on {} ({} bytes)",
            self.command.display(),
            staged.path().display(),
            image.len()
        );

        let result = timeout(
            Duration::from_secs(self.timeout_secs),
            Command::new(&self.command)
                .arg(staged.path())
                .arg("stdout")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => {
                if output.status.success() {
                    let text = String::from_utf8_lossy(&output.stdout).into_owned();
                    info!("OCR extracted {} characters", text.chars().count());
                    Ok(text)
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    error!("OCR engine failed: {}", stderr);
                    Err(OcrError::Engine {
                        status: output.status.to_string(),
                        stderr,
                    })
                }
            }
            Ok(Err(e)) => {
                error!("Failed to execute {}: {}", self.command.display(), e);
                Err(OcrError::Launch {
                    path: self.command.clone(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                error!("Timeout while running {}", self.command.display());
                Err(OcrError::Timeout {
                    timeout_secs: self.timeout_secs,
                })
            }
        }
    }
}

impl TextExtractor for TesseractOcr {
    fn extract_text<'a>(&'a self, image: &'a [u8]) -> BoxFuture<'a, Result<String, OcrError>> {
        Box::pin(self.run(image))
    }
}
