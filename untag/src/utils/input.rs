//! Reading markup from a file or stdin.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads the whole input, from `path` if given, otherwise from stdin.
///
/// Invalid UTF-8 is replaced rather than rejected; markup scraped from the
/// web is frequently mis-encoded.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            debug!("Reading input from stdin...");
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("Failed to read from stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Human-friendly label for the input, used in logs and reports.
pub fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".to_string())
}
