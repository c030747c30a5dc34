//! Command implementations and the helpers they share.

pub mod config;
pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;

use untag_core::{merge_config, Sanitizer, SanitizerConfig};

use crate::cli::EngineArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Loads the effective config, applies the command-line overrides and builds the sanitizer.
pub fn build_sanitizer(args: &EngineArgs) -> Result<Sanitizer> {
    let base = SanitizerConfig::load_effective(args.config.as_deref())?;
    let config = merge_config(base, Some(args.to_overrides()));
    debug!("Effective config: {:?}", config);
    Sanitizer::new(config).context("Invalid configuration")
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}
