// untag-core/tests/sanitizer_tests.rs
//! Behavioural tests for the sanitizer through the public API.

use anyhow::Result;
use regex::Regex;
use std::panic;
use test_log::test;

use untag_core::{
    sanitize, EngineChoice, EngineSlot, ExtractionPath, MarkupEngine, PostProcessing, Sanitizer,
    SanitizerConfig, UntagError,
};

fn pattern_only() -> Sanitizer {
    let config = SanitizerConfig {
        engine: EngineChoice::Pattern,
        ..SanitizerConfig::default()
    };
    Sanitizer::new(config).unwrap()
}

struct PanickyEngine;

impl MarkupEngine for PanickyEngine {
    fn name(&self) -> &'static str {
        "panicky"
    }
    fn extract_text(&self, _markup: &str) -> Result<String, UntagError> {
        panic!("tree builder blew up")
    }
}

fn has_tag(text: &str) -> bool {
    Regex::new(r"<[^>]*>").unwrap().is_match(text)
}

#[test]
fn empty_inputs_give_empty_output() {
    assert_eq!(sanitize(None), "");
    assert_eq!(sanitize(Some("")), "");
    assert_eq!(pattern_only().sanitize(None), "");
    assert_eq!(pattern_only().sanitize(Some("")), "");
}

#[test]
fn plain_text_is_unchanged_on_both_paths() {
    let inputs = [
        "Nothing to see here, just words.",
        "if x <y then",
        "line one\r\nline two",
        "Fish &amp; Chips &lt;3",
        "a > b && c < d",
    ];
    for input in inputs {
        let report = Sanitizer::default().sanitize_with_report(Some(input));
        assert_eq!(report.text, input);
        assert_eq!(report.path, ExtractionPath::Verbatim);
        assert_eq!(pattern_only().sanitize(Some(input)), input);
    }
}

#[test]
fn nested_tags_are_removed_on_both_paths() {
    let input = "<p>Hello <b>World</b></p>";
    assert_eq!(sanitize(Some(input)), "Hello World");
    assert_eq!(pattern_only().sanitize(Some(input)), "Hello World");
}

#[test]
fn unclosed_tag_keeps_text_without_tag_syntax() {
    for sanitizer in [Sanitizer::default(), pattern_only()] {
        let out = sanitizer.sanitize(Some("<div>Test"));
        assert!(out.contains("Test"), "missing text: {:?}", out);
        assert!(!out.contains('<') && !out.contains('>'), "tag syntax left: {:?}", out);
    }
}

#[test]
fn sanitizing_twice_changes_nothing_more() {
    let once = sanitize(Some("<ul><li>one</li><li>two</li></ul>"));
    assert_eq!(once, "onetwo");
    assert_eq!(sanitize(Some(&once)), once);

    let sanitizer = pattern_only();
    let once = sanitizer.sanitize(Some("<h1>Title</h1> body"));
    assert_eq!(sanitizer.sanitize(Some(&once)), once);
}

#[test]
fn decoded_output_without_tags_is_stable() {
    let once = sanitize(Some("<p>1 &lt;b &amp;amp;</p>"));
    assert!(!has_tag(&once));
    assert_eq!(sanitize(Some(&once)), once);
}

#[cfg(feature = "structural")]
#[test]
fn decoded_tags_are_stripped_on_a_second_pass() {
    let once = sanitize(Some("<p>&lt;b&gt;bold&lt;/b&gt;</p>"));
    assert_eq!(once, "<b>bold</b>");
    assert_eq!(sanitize(Some(&once)), "bold");
}

#[cfg(feature = "structural")]
#[test]
fn template_contents_are_omitted() {
    assert_eq!(sanitize(Some("a<template>hidden</template>b")), "ab");
}

#[test]
fn malformed_markup_never_panics() {
    let inputs = [
        "<",
        ">",
        "<<>>",
        "</>",
        "<p <b>",
        "<!-- unterminated comment",
        "<![CDATA[x]]>",
        "<table><tr><td>cell</table>",
        "&#xD800; &bogus; &",
        "\u{0}<p>\u{0}</p>",
    ];
    let sanitizer = Sanitizer::default();
    let fallback = pattern_only();
    for input in inputs {
        let report = sanitizer.sanitize_with_report(Some(input));
        assert_eq!(sanitize(Some(input)), report.text);
        assert_eq!(report.input_bytes, input.len());
        if has_tag(input) {
            assert_ne!(report.path, ExtractionPath::Verbatim, "{:?}", input);
        } else {
            assert_eq!(report.text, input);
        }

        let stripped = fallback.sanitize(Some(input));
        assert!(!has_tag(&stripped), "{:?} -> {:?}", input, stripped);
    }
}

#[cfg(feature = "structural")]
#[test]
fn structural_path_decodes_entities() {
    let report = Sanitizer::default().sanitize_with_report(Some("<p>Tom &amp; Jerry&nbsp;&#33;</p>"));
    assert_eq!(report.path, ExtractionPath::Structural);
    assert_eq!(report.text, "Tom & Jerry\u{a0}!");
    assert!(report.fallback_reason.is_none());
}

#[test]
fn fallback_path_leaves_entities_alone() {
    let report = pattern_only().sanitize_with_report(Some("<p>Tom &amp; Jerry</p>"));
    assert_eq!(report.path, ExtractionPath::Pattern);
    assert_eq!(report.text, "Tom &amp; Jerry");
    assert_eq!(report.fallback_reason.as_deref(), Some("pattern engine selected"));
}

#[test]
fn engine_panic_is_recovered_and_reported() {
    let sanitizer = Sanitizer::with_primary(
        SanitizerConfig::default(),
        EngineSlot::Available(Box::new(PanickyEngine)),
    )
    .unwrap();
    let report = panic::catch_unwind(panic::AssertUnwindSafe(|| sanitizer.sanitize_with_report(Some("<b>ok</b>"))))
        .expect("engine panic escaped the sanitizer");
    assert_eq!(report.text, "ok");
    assert!(report.used_fallback());
    assert_eq!(
        report.fallback_reason.as_deref(),
        Some("The panicky engine panicked: tree builder blew up")
    );
}

#[test]
fn unavailable_primary_uses_pattern_engine() {
    let sanitizer = Sanitizer::with_primary(
        SanitizerConfig::default(),
        EngineSlot::Unavailable {
            reason: "no parser in this environment".into(),
        },
    )
    .unwrap();
    assert_eq!(sanitizer.primary().engine_name(), None);
    let report = sanitizer.sanitize_with_report(Some("<i>x</i> &lt;"));
    assert_eq!(report.text, "x &lt;");
    assert_eq!(report.fallback_reason.as_deref(), Some("no parser in this environment"));
}

#[cfg(feature = "structural")]
#[test]
fn oversized_input_falls_back() -> Result<()> {
    let config = SanitizerConfig {
        max_structural_bytes: 16,
        ..SanitizerConfig::default()
    };
    let sanitizer = Sanitizer::new(config)?;
    assert_eq!(sanitizer.primary().engine_name(), Some("structural"));

    let small = sanitizer.sanitize_with_report(Some("<b>&amp;</b>"));
    assert_eq!(small.path, ExtractionPath::Structural);
    assert_eq!(small.text, "&");

    let large = sanitizer.sanitize_with_report(Some("<p>a long paragraph &amp; more</p>"));
    assert_eq!(large.path, ExtractionPath::Pattern);
    assert_eq!(large.text, "a long paragraph &amp; more");
    Ok(())
}

#[cfg(feature = "structural")]
#[test]
fn ignored_elements_apply_only_to_structural_path() -> Result<()> {
    let markup = "<p>keep</p><script>drop()</script>";
    let config = SanitizerConfig {
        ignored_elements: vec!["script".into()],
        ..SanitizerConfig::default()
    };
    assert_eq!(Sanitizer::new(config.clone())?.sanitize(Some(markup)), "keep");

    let config = SanitizerConfig {
        engine: EngineChoice::Pattern,
        ..config
    };
    assert_eq!(Sanitizer::new(config)?.sanitize(Some(markup)), "keepdrop()");
    Ok(())
}

#[test]
fn report_counts_bytes_and_tags() {
    let input = "<p>Hello <b>World</b></p>";
    let report = pattern_only().sanitize_with_report(Some(input));
    assert_eq!(report.input_bytes, input.len());
    assert_eq!(report.output_bytes, "Hello World".len());
    assert_eq!(report.tags_removed, 4);
    assert_eq!(report.input_sha256.len(), 64);
}

#[test]
fn post_processing_applies_to_fallback_output() -> Result<()> {
    let config = SanitizerConfig {
        engine: EngineChoice::Pattern,
        post_processing: PostProcessing {
            collapse_whitespace: true,
            trim: true,
            ..PostProcessing::default()
        },
        ..SanitizerConfig::default()
    };
    let out = Sanitizer::new(config)?.sanitize(Some("\n<div>\n  a\n</div>\n<div>b</div>\n"));
    assert_eq!(out, "a b");
    Ok(())
}

#[test]
fn sanitizer_is_shareable_across_threads() {
    let sanitizer = std::sync::Arc::new(Sanitizer::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let s = std::sync::Arc::clone(&sanitizer);
            std::thread::spawn(move || s.sanitize(Some(&format!("<em>{}</em>", i))))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i.to_string());
    }
}
