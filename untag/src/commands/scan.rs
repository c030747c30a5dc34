//! `untag scan`: describe how an input would be converted, without printing it.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use untag_core::{ExtractionPath, ReportSummary, SanitizeReport, Sanitizer};

use crate::commands::success_msg;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;
use crate::utils::input::{read_input, source_label};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub input_file: Option<PathBuf>,
    pub json_file: Option<PathBuf>,
    pub json_stdout: bool,
    pub fail_on_fallback: bool,
    pub line_buffered: bool,
    pub quiet: bool,
}

/// One sanitized unit (the whole input, or one line) without its text.
#[derive(Debug, Serialize)]
pub struct ScanEntry<'a> {
    pub path: ExtractionPath,
    pub fallback_reason: Option<&'a str>,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub tags_removed: usize,
    pub input_sha256: &'a str,
}

impl<'a> From<&'a SanitizeReport> for ScanEntry<'a> {
    fn from(report: &'a SanitizeReport) -> Self {
        Self {
            path: report.path,
            fallback_reason: report.fallback_reason.as_deref(),
            input_bytes: report.input_bytes,
            output_bytes: report.output_bytes,
            tags_removed: report.tags_removed,
            input_sha256: &report.input_sha256,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub source: String,
    pub engine: &'static str,
    pub summary: ReportSummary,
    pub entries: Vec<ScanEntry<'a>>,
}

pub fn build_scan_report<'a>(sanitizer: &Sanitizer, source: String, reports: &'a [SanitizeReport]) -> ScanReport<'a> {
    ScanReport {
        source,
        engine: sanitizer.primary().engine_name().unwrap_or("pattern"),
        summary: reports.iter().collect(),
        entries: reports.iter().map(ScanEntry::from).collect(),
    }
}

pub fn run_scan(sanitizer: &Sanitizer, opts: &ScanOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting scan operation.");
    let input = read_input(opts.input_file.as_deref())?;
    let reports = if opts.line_buffered {
        sanitizer.sanitize_lines(&input).1
    } else {
        vec![sanitizer.sanitize_with_report(Some(&input))]
    };
    let report = build_scan_report(sanitizer, source_label(opts.input_file.as_deref()), &reports);

    if opts.json_stdout {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
        println!("{}", json);
    } else if let Some(path) = &opts.json_file {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
        fs::write(path, json).with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
        if !opts.quiet {
            success_msg(format!("Scan report written to {}", path.display()), theme);
        }
    } else {
        let supports_color = io::stdout().is_terminal();
        summary::print_summary(&report.summary, &mut io::stdout(), theme, supports_color)?;
    }

    if opts.fail_on_fallback && report.summary.pattern > 0 {
        bail!(
            "{} of {} input(s) needed the pattern fallback",
            report.summary.pattern,
            report.summary.inputs
        );
    }
    info!("Scan operation completed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use untag_core::{EngineChoice, SanitizerConfig};

    #[test]
    fn scan_report_omits_text() {
        let sanitizer = Sanitizer::new(SanitizerConfig {
            engine: EngineChoice::Pattern,
            ..SanitizerConfig::default()
        })
        .unwrap();
        let reports = vec![sanitizer.sanitize_with_report(Some("<p>secret words</p>"))];
        let report = build_scan_report(&sanitizer, "stdin".into(), &reports);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["engine"], "pattern");
        assert_eq!(json["summary"]["pattern"], 1);
        assert_eq!(json["entries"][0]["tags_removed"], 2);
        assert!(!json.to_string().contains("secret words"));
    }
}
