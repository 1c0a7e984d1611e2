// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod history;
pub mod ocr;
pub mod risk;
pub mod server;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_imports() {
        let _ = config::ConfigParameter::default();
        let _ = history::HistoryStore::new();
        let _ = risk::classify_text("");
        let _ = risk::classify_website_content("");
        let _ = ocr::TesseractOcr::new(std::path::PathBuf::from("tesseract"), 1);
        let _ = fetch::HttpFetcher::new(5).unwrap();
    }
}
