// untag-core/src/lib.rs
//! # untag Core Library
//!
//! `untag-core` converts markup into plain text. It prefers a structural
//! HTML5 parse, which resolves entity references the way a browser does, and
//! falls back to stripping `<...>` substrings with a regular expression when
//! the structural path is unavailable or fails. The fallback leaves entity
//! references encoded; that difference between the two paths is a known
//! limitation, not something the library tries to hide.
//!
//! Input that holds no `<...>` tag is returned unchanged by either path, so
//! `&amp;`, a stray `<` or a `\r\n` in plain text survive untouched. The
//! flip side: structural output can hold tag-shaped text decoded from
//! entities (`&lt;b&gt;` becomes `<b>`), and sanitizing that again strips it.
//!
//! The library is pure and stateless: no I/O beyond reading config files,
//! no global mutable state.
//!
//! ## Modules
//!
//! * `config`: `SanitizerConfig`, YAML loading, merging and validation.
//! * `engine`: The `MarkupEngine` trait and the `EngineSlot` availability wrapper.
//! * `engines`: The structural (html5ever) and pattern (regex) engines.
//! * `sanitizer`: `Sanitizer`, which orders the engines and never fails.
//! * `report`: `SanitizeReport` and `ReportSummary`, describing what ran.
//! * `headless`: One-shot helpers, including the plain `sanitize` function.
//! * `errors`: `UntagError`.
//!
//! ## Usage Example
//!
//! ```rust
//! use untag_core::sanitize;
//!
//! assert_eq!(sanitize(Some("<p>Hello <b>World</b></p>")), "Hello World");
//! assert_eq!(sanitize(None), "");
//! ```
//!
//! With a custom config:
//!
//! ```rust
//! use untag_core::{Sanitizer, SanitizerConfig, ExtractionPath};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut config = SanitizerConfig::load_default()?;
//!     config.ignored_elements = vec!["script".to_string()];
//!     let sanitizer = Sanitizer::new(config)?;
//!
//!     let report = sanitizer.sanitize_with_report(Some("<p>hi</p><script>x()</script>"));
//!     println!("{} via {}", report.text, report.path);
//!     assert_ne!(report.path, ExtractionPath::Empty);
//!     Ok(())
//! }
//! ```
//!
//! ## Cargo features
//!
//! * `structural` (default): enables the html5ever-backed engine through
//!   `scraper`. Without it every call takes the pattern path.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod report;
pub mod sanitizer;

/// Re-exports the configuration types and helpers.
pub use config::{
    merge_config,
    resolve_config_path,
    ConfigOverrides,
    EngineChoice,
    PostProcessing,
    PostProcessingOverrides,
    SanitizerConfig,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::UntagError;

/// Re-exports the engine trait, the availability slot and both engines.
pub use engine::{EngineSlot, MarkupEngine};
pub use engines::pattern::PatternEngine;
pub use engines::structural::StructuralEngine;

pub use report::{ExtractionPath, ReportSummary, SanitizeReport};
pub use sanitizer::Sanitizer;

/// Re-exports the one-shot entry points.
pub use headless::{headless_sanitize_string, sanitize};
