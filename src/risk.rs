// File: risk.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Outcome of a single classification: a risk level and a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub risk_level: RiskLevel,
    pub reason: String,
}

impl Verdict {
    pub fn new(risk_level: RiskLevel, reason: impl Into<String>) -> Self {
        Self {
            risk_level,
            reason: reason.into(),
        }
    }
}

pub const NO_MATCH_REASON: &str = "No major suspicious patterns found";
pub const SCAM_OFFER_REASON: &str = "Possible scam or unsolicited offer";
pub const SUSPICIOUS_PAGE_REASON: &str = "Suspicious keywords found on page";
pub const UNREACHABLE_PREFIX: &str = "Unable to reach site:";

struct KeywordRule {
    keywords: &'static [&'static str],
    level: RiskLevel,
    reason: &'static str,
}

static TEXT_RULE: KeywordRule = KeywordRule {
    keywords: &["free", "paid", "job"],
    level: RiskLevel::Medium,
    reason: SCAM_OFFER_REASON,
};

static PAGE_RULE: KeywordRule = KeywordRule {
    keywords: &["login", "password", "bank", "account"],
    level: RiskLevel::High,
    reason: SUSPICIOUS_PAGE_REASON,
};

impl KeywordRule {
    // Plain substring search: "jobs" and "freedom" both match on purpose.
    fn apply(&self, content: &str) -> Verdict {
        let lowered = content.to_lowercase();
        match self.keywords.iter().find(|k| lowered.contains(*k)) {
            Some(keyword) => {
                debug!("Keyword '{}' matched, rating {}", keyword, self.level);
                Verdict::new(self.level, self.reason)
            }
            None => Verdict::new(RiskLevel::Low, NO_MATCH_REASON),
        }
    }
}

pub fn classify_text(text: &str) -> Verdict {
    TEXT_RULE.apply(text)
}

pub fn classify_website_content(page_body: &str) -> Verdict {
    PAGE_RULE.apply(page_body)
}

/// Verdict for a site that could not be fetched. Unreachability counts as a
/// risk signal rather than an error.
pub fn unreachable_site(message: &str) -> Verdict {
    Verdict::new(
        RiskLevel::Medium,
        format!("{} {}", UNREACHABLE_PREFIX, message),
    )
}

#[cfg(test)]
#[path = "risk_tests.rs"]
mod tests;
