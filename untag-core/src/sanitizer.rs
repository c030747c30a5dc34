// untag-core/src/sanitizer.rs
//! The text sanitizer: markup in, plain text out.
//!
//! A [`Sanitizer`] owns an optional primary engine (normally the structural
//! one) and the pattern engine. Absent or empty input short-circuits to an
//! empty string, and input with no `<...>` tag at all is returned as is.
//! Otherwise the primary engine runs if it is available; if it is missing,
//! returns an error or panics, the pattern engine produces the output.
//! The caller never sees an error from [`Sanitizer::sanitize`].
//!
//! Panics are only recoverable when the build unwinds; the workspace release
//! profile keeps `panic = "unwind"` for that reason.
//!
//! License: MIT OR APACHE 2.0

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use strip_ansi_escapes::strip;

use crate::config::{EngineChoice, PostProcessing, SanitizerConfig};
use crate::engine::{EngineSlot, MarkupEngine};
use crate::engines::pattern::{count_tags, PatternEngine};
use crate::engines::structural::StructuralEngine;
use crate::errors::UntagError;
use crate::report::{sha256_hex, ExtractionPath, SanitizeReport};

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug)]
pub struct Sanitizer {
    primary: EngineSlot,
    fallback: PatternEngine,
    config: SanitizerConfig,
}

impl Sanitizer {
    /// Builds a sanitizer from a validated config.
    ///
    /// A structural engine that cannot be constructed is not an error here;
    /// the sanitizer simply starts with the primary slot unavailable.
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        let primary = match config.engine {
            EngineChoice::Auto => EngineSlot::from_result(StructuralEngine::from_config(&config)),
            EngineChoice::Pattern => EngineSlot::Unavailable {
                reason: "pattern engine selected".to_string(),
            },
        };
        Self::with_primary(config, primary)
    }

    /// Builds a sanitizer around a caller-supplied primary engine slot.
    pub fn with_primary(config: SanitizerConfig, primary: EngineSlot) -> Result<Self> {
        config.validate()?;
        debug!("Sanitizer created with primary engine {:?}", primary);
        Ok(Self {
            primary,
            fallback: PatternEngine::new(),
            config,
        })
    }

    /// A sanitizer using the embedded defaults.
    pub fn with_defaults() -> Self {
        Self {
            primary: EngineSlot::from_result(StructuralEngine::from_config(&SanitizerConfig::default())),
            fallback: PatternEngine::new(),
            config: SanitizerConfig::default(),
        }
    }

    pub fn primary(&self) -> &EngineSlot {
        &self.primary
    }

    /// Returns the visible text of `markup`. `None` and `""` yield `""`.
    ///
    /// Tag-free input comes back unchanged, so sanitizing an output that
    /// holds no tags is a no-op. Structural output can contain tag-shaped
    /// text decoded from entities (`&lt;b&gt;` gives `<b>`); a second pass
    /// strips that, since it is no longer tag-free.
    pub fn sanitize(&self, markup: Option<&str>) -> String {
        self.sanitize_with_report(markup).text
    }

    /// Like [`Sanitizer::sanitize`], also describing which path ran and why.
    pub fn sanitize_with_report(&self, markup: Option<&str>) -> SanitizeReport {
        let raw = match markup {
            Some(m) if !m.is_empty() => m,
            _ => return SanitizeReport::empty(),
        };

        let prepared: Cow<'_, str> = if self.config.post_processing.strip_ansi {
            Cow::Owned(String::from_utf8_lossy(&strip(raw.as_bytes())).into_owned())
        } else {
            Cow::Borrowed(raw)
        };

        let tags_removed = count_tags(&prepared);
        let (text, path, fallback_reason) = if tags_removed == 0 {
            debug!("No tags found, returning input verbatim.");
            (prepared.to_string(), ExtractionPath::Verbatim, None)
        } else {
            self.extract(&prepared)
        };

        let text = post_process(text, &self.config.post_processing);
        SanitizeReport {
            output_bytes: text.len(),
            text,
            path,
            fallback_reason,
            input_bytes: raw.len(),
            tags_removed,
            input_sha256: sha256_hex(raw),
        }
    }

    fn extract(&self, markup: &str) -> (String, ExtractionPath, Option<String>) {
        match &self.primary {
            EngineSlot::Available(engine) => match run_guarded(&**engine, markup) {
                Ok(text) => (text, ExtractionPath::Structural, None),
                Err(e) => {
                    warn!("{} engine failed, using pattern fallback: {}", engine.name(), e);
                    (self.fallback.strip(markup), ExtractionPath::Pattern, Some(e.to_string()))
                }
            },
            EngineSlot::Unavailable { reason } => {
                debug!("Primary engine unavailable ({}), using pattern engine.", reason);
                (self.fallback.strip(markup), ExtractionPath::Pattern, Some(reason.clone()))
            }
        }
    }

    /// Sanitizes a single line. The `\n` or `\r\n` terminator is kept away
    /// from the engines and returned untouched next to the report.
    pub fn sanitize_line<'a>(&self, line: &'a str) -> (SanitizeReport, &'a str) {
        let body = line.trim_end_matches(['\n', '\r']);
        (self.sanitize_with_report(Some(body)), &line[body.len()..])
    }

    /// Sanitizes each line of `input` on its own, preserving line terminators.
    ///
    /// Markup that spans lines is not reassembled; a tag split across two
    /// lines is seen as text by both halves.
    pub fn sanitize_lines(&self, input: &str) -> (String, Vec<SanitizeReport>) {
        let mut output = String::with_capacity(input.len());
        let mut reports = Vec::new();
        for line in input.split_inclusive('\n') {
            let (report, terminator) = self.sanitize_line(line);
            output.push_str(&report.text);
            output.push_str(terminator);
            reports.push(report);
        }
        (output, reports)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Runs `engine`, turning a panic into [`UntagError::EnginePanicked`].
fn run_guarded(engine: &dyn MarkupEngine, markup: &str) -> Result<String, UntagError> {
    panic::catch_unwind(AssertUnwindSafe(|| engine.extract_text(markup))).unwrap_or_else(|payload| {
        Err(UntagError::EnginePanicked(
            engine.name().to_string(),
            panic_message(payload.as_ref()),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn post_process(text: String, pp: &PostProcessing) -> String {
    if pp.is_noop() {
        return text;
    }
    let mut text = if pp.collapse_whitespace {
        WHITESPACE_RE.replace_all(&text, " ").into_owned()
    } else {
        text
    };
    if pp.trim {
        text = text.trim().to_string();
    }
    text
}
