//! Reporting types describing how a single input was sanitized.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Which route produced the plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPath {
    /// Input was absent or empty; nothing ran.
    Empty,
    /// Input held no `<...>` tag and was returned as is.
    Verbatim,
    Structural,
    Pattern,
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractionPath::Empty => "empty",
            ExtractionPath::Verbatim => "verbatim",
            ExtractionPath::Structural => "structural",
            ExtractionPath::Pattern => "pattern",
        };
        f.write_str(s)
    }
}

/// The outcome of one sanitization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    /// The plain text returned to the caller.
    pub text: String,
    pub path: ExtractionPath,
    /// Why the structural engine was skipped or failed, when the pattern path ran.
    pub fallback_reason: Option<String>,
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// Tag-shaped substrings in the input, counted with the fallback pattern.
    pub tags_removed: usize,
    /// Hex SHA-256 of the raw input.
    pub input_sha256: String,
}

impl SanitizeReport {
    pub(crate) fn empty() -> Self {
        Self {
            text: String::new(),
            path: ExtractionPath::Empty,
            fallback_reason: None,
            input_bytes: 0,
            output_bytes: 0,
            tags_removed: 0,
            input_sha256: sha256_hex(""),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.path == ExtractionPath::Pattern
    }
}

/// Aggregated counts over many reports, e.g. one per line in line-buffered mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub inputs: usize,
    pub verbatim: usize,
    pub structural: usize,
    pub pattern: usize,
    pub empty: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub tags_removed: usize,
    /// Distinct fallback reasons in first-seen order.
    pub fallback_reasons: Vec<String>,
}

impl ReportSummary {
    pub fn add(&mut self, report: &SanitizeReport) {
        self.inputs += 1;
        match report.path {
            ExtractionPath::Empty => self.empty += 1,
            ExtractionPath::Verbatim => self.verbatim += 1,
            ExtractionPath::Structural => self.structural += 1,
            ExtractionPath::Pattern => self.pattern += 1,
        }
        self.input_bytes += report.input_bytes;
        self.output_bytes += report.output_bytes;
        self.tags_removed += report.tags_removed;
        if let Some(reason) = &report.fallback_reason {
            if !self.fallback_reasons.contains(reason) {
                self.fallback_reasons.push(reason.clone());
            }
        }
    }
}

impl<'a> FromIterator<&'a SanitizeReport> for ReportSummary {
    fn from_iter<I: IntoIterator<Item = &'a SanitizeReport>>(iter: I) -> Self {
        let mut summary = ReportSummary::default();
        for report in iter {
            summary.add(report);
        }
        summary
    }
}

pub(crate) fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
