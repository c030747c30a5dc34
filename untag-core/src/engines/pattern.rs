// untag-core/src/engines/pattern.rs
//! A `MarkupEngine` that removes tag-shaped substrings with a regular expression.
//!
//! This is the degraded path: it never fails, but it does not decode entity
//! references, so `&amp;` stays `&amp;`. Text inside `<script>` or `<style>`
//! survives as well, because only the tags themselves are removed.
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::engine::MarkupEngine;
use crate::errors::UntagError;

lazy_static! {
    /// Anything from `<` up to the next `>`, including newlines in between.
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PatternEngine;

impl PatternEngine {
    pub fn new() -> Self {
        Self
    }

    /// Removes every tag-shaped substring. Infallible.
    pub fn strip(&self, markup: &str) -> String {
        let stripped = TAG_RE.replace_all(markup, "");
        debug!(
            target: "untag_core::engines::pattern",
            "Stripped {} byte(s) of tag syntax.",
            markup.len() - stripped.len()
        );
        stripped.into_owned()
    }
}

impl MarkupEngine for PatternEngine {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract_text(&self, markup: &str) -> Result<String, UntagError> {
        Ok(self.strip(markup))
    }
}

/// Number of tag-shaped substrings in `markup`.
pub fn count_tags(markup: &str) -> usize {
    TAG_RE.find_iter(markup).count()
}
