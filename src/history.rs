// File: history.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::risk::RiskLevel;

/// Number of characters kept from free text before the ellipsis is appended.
pub const CONTENT_PREVIEW_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanType {
    Text,
    Screenshot,
    Website,
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanType::Text => write!(f, "Text"),
            ScanType::Screenshot => write!(f, "Screenshot"),
            ScanType::Website => write!(f, "Website"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub scan_type: ScanType,
    pub content: String,
    pub risk_level: RiskLevel,
}

impl ScanRecord {
    pub fn new(scan_type: ScanType, content: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            timestamp: Utc::now(),
            scan_type,
            content: content.into(),
            risk_level,
        }
    }

    /// Record for a text scan, with the input cut down to a short preview.
    pub fn for_text(text: &str, risk_level: RiskLevel) -> Self {
        Self::new(ScanType::Text, preview(text), risk_level)
    }
}

/// First [`CONTENT_PREVIEW_CHARS`] characters of `text`, followed by `...`
/// when anything was cut. Counts characters, not bytes.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskStats {
    #[serde(rename = "Low")]
    pub low: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "High")]
    pub high: usize,
}

impl RiskStats {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Append-only, process-lifetime log of completed scans.
///
/// One lock covers the whole sequence. A reader sees the history either
/// before or after any append, never in between.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: RwLock<Vec<ScanRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A push either happened or it did not, so a poisoned lock still guards
    // a consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Vec<ScanRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ScanRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, record: ScanRecord) {
        debug!(
            "Recording {} scan rated {}",
            record.scan_type, record.risk_level
        );
        self.write().push(record);
    }

    /// Snapshot of every record in insertion order.
    pub fn all(&self) -> Vec<ScanRecord> {
        self.read().clone()
    }

    pub fn stats(&self) -> RiskStats {
        let mut stats = RiskStats::default();
        for record in self.read().iter() {
            stats.record(record.risk_level);
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
