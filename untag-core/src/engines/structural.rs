// untag-core/src/engines/structural.rs
//! A `MarkupEngine` that parses the input as an HTML5 fragment and returns the
//! concatenation of its text nodes, in document order.
//!
//! This mirrors what a browser reports as `textContent` for the fragment:
//! entity references are resolved, tags disappear, and the text of every
//! element (scripts and styles included) is kept unless the element is listed
//! in `ignored_elements`. `<template>` contents are never visited: a browser
//! parses them into a separate fragment outside the `textContent` walk, while
//! html5ever leaves them in the tree.
//!
//! The engine can refuse work, which is what sends the sanitizer down the
//! pattern fallback:
//! * the crate was built without the `structural` feature,
//! * the input exceeds `max_structural_bytes`,
//! * `strict` is on and html5ever reported a parse error.
//!
//! Panics are caught one level up, in the sanitizer.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

#[cfg(feature = "structural")]
use log::debug;
#[cfg(feature = "structural")]
use scraper::{Html, Node};

use crate::config::SanitizerConfig;
use crate::engine::MarkupEngine;
use crate::errors::UntagError;

#[derive(Debug, Clone)]
#[cfg_attr(not(feature = "structural"), allow(dead_code))]
pub struct StructuralEngine {
    max_bytes: usize,
    strict: bool,
    /// Lowercased element names.
    ignored: HashSet<String>,
}

impl StructuralEngine {
    /// Builds the engine, or reports why it cannot exist in this build.
    pub fn from_config(config: &SanitizerConfig) -> Result<Self, UntagError> {
        #[cfg(feature = "structural")]
        {
            Ok(Self {
                max_bytes: config.max_structural_bytes,
                strict: config.strict,
                ignored: config
                    .ignored_elements
                    .iter()
                    .map(|e| e.to_ascii_lowercase())
                    .collect(),
            })
        }
        #[cfg(not(feature = "structural"))]
        {
            let _ = config;
            Err(UntagError::ParserUnavailable(
                "untag-core was built without the `structural` feature".to_string(),
            ))
        }
    }

    #[cfg(feature = "structural")]
    fn parse_and_collect(&self, markup: &str) -> Result<String, UntagError> {
        let fragment = Html::parse_fragment(markup);

        if !fragment.errors.is_empty() {
            debug!(
                target: "untag_core::engines::structural",
                "html5ever reported {} parse error(s), first: {}",
                fragment.errors.len(),
                fragment.errors[0]
            );
            if self.strict {
                return Err(UntagError::StrictParse(
                    fragment.errors.len(),
                    fragment.errors[0].to_string(),
                ));
            }
        }

        let mut text = String::with_capacity(markup.len());
        for node in fragment.tree.root().descendants() {
            let Node::Text(chunk) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| self.hides(el.name()))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
        Ok(text)
    }

    #[cfg(feature = "structural")]
    fn hides(&self, element: &str) -> bool {
        element.eq_ignore_ascii_case("template")
            || (!self.ignored.is_empty() && self.ignored.contains(&element.to_ascii_lowercase()))
    }

    #[cfg(not(feature = "structural"))]
    fn parse_and_collect(&self, _markup: &str) -> Result<String, UntagError> {
        Err(UntagError::ParserUnavailable(
            "untag-core was built without the `structural` feature".to_string(),
        ))
    }
}

impl MarkupEngine for StructuralEngine {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract_text(&self, markup: &str) -> Result<String, UntagError> {
        if markup.len() > self.max_bytes {
            return Err(UntagError::InputTooLarge(markup.len(), self.max_bytes));
        }
        self.parse_and_collect(markup)
    }
}
