// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::{debug, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_TESSERACT: &str = "tesseract";
pub const WINDOWS_TESSERACT: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";

pub const PORT_VAR: &str = "PORT";
pub const TESSERACT_VAR: &str = "TESSERACT_CMD";

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    host: String,
    port: u16,
    fetch_timeout: u64,
    ocr_timeout: u64,
    tesseract_cmd: PathBuf,
    static_dir: PathBuf,
    max_upload_bytes: usize,
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: 5,
            ocr_timeout: 30,
            tesseract_cmd: PathBuf::from(DEFAULT_TESSERACT),
            static_dir: PathBuf::from("frontend"),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with `PORT` and `TESSERACT_CMD` as returned by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(PORT_VAR) {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.set_port(port),
                Err(e) => warn!(
                    "Ignoring {}={:?} ({}), using port {}",
                    PORT_VAR, raw, e, DEFAULT_PORT
                ),
            }
        }

        config.set_tesseract_cmd(resolve_tesseract_cmd(lookup(TESSERACT_VAR).as_deref()));
        config
    }

    pub fn set_host(&mut self, host: String) {
        self.host = host;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_fetch_timeout(&mut self, fetch_timeout: u64) {
        self.fetch_timeout = fetch_timeout;
    }

    pub fn fetch_timeout(&self) -> u64 {
        self.fetch_timeout
    }

    pub fn set_ocr_timeout(&mut self, ocr_timeout: u64) {
        self.ocr_timeout = ocr_timeout;
    }

    pub fn ocr_timeout(&self) -> u64 {
        self.ocr_timeout
    }

    pub fn set_tesseract_cmd(&mut self, tesseract_cmd: PathBuf) {
        self.tesseract_cmd = tesseract_cmd;
    }

    pub fn tesseract_cmd(&self) -> &Path {
        &self.tesseract_cmd
    }

    pub fn set_static_dir(&mut self, static_dir: PathBuf) {
        self.static_dir = static_dir;
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn set_max_upload_bytes(&mut self, max_upload_bytes: usize) {
        self.max_upload_bytes = max_upload_bytes;
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

/// Picks the OCR binary: the configured path (or the stock Windows install
/// location) when it exists on disk, otherwise whatever `tesseract` is on PATH.
pub fn resolve_tesseract_cmd(configured: Option<&str>) -> PathBuf {
    let candidate = Path::new(configured.unwrap_or(WINDOWS_TESSERACT));
    if candidate.exists() {
        debug!("Using OCR engine at {}", candidate.display());
        candidate.to_path_buf()
    } else {
        if configured.is_some() {
            warn!(
                "{} points to missing file {}, falling back to {}",
                TESSERACT_VAR,
                candidate.display(),
                DEFAULT_TESSERACT
            );
        }
        PathBuf::from(DEFAULT_TESSERACT)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
