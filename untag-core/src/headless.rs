// untag-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot sanitization without managing a
//! [`Sanitizer`] yourself.

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::config::{EngineChoice, SanitizerConfig};
use crate::sanitizer::Sanitizer;

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(Sanitizer::with_defaults);

/// Converts markup to plain text with the built-in settings.
///
/// `None` and `""` produce `""`, and tag-free text comes back unchanged.
/// Never fails: if the structural parse cannot run, tags are stripped by
/// pattern and entities are left as written.
pub fn sanitize(markup: Option<&str>) -> String {
    DEFAULT_SANITIZER.sanitize(markup)
}

/// Sanitizes `content` with an explicit config and engine choice.
///
/// # Arguments
///
/// * `config` - The merged config (defaults + optional user overrides).
/// * `content` - The markup to convert.
/// * `engine` - Overrides `config.engine`.
///
/// Only an invalid `config` produces an error.
pub fn headless_sanitize_string(
    mut config: SanitizerConfig,
    content: &str,
    engine: EngineChoice,
) -> Result<String> {
    config.engine = engine;
    let sanitizer = Sanitizer::new(config)?;
    Ok(sanitizer.sanitize(Some(content)))
}
