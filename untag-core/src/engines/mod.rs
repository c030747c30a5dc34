// untag-core/src/engines/mod.rs
//! Concrete implementations of the `MarkupEngine` trait.
//!
//! * `structural` parses the markup as an HTML5 fragment (feature `structural`).
//! * `pattern` strips anything shaped like a tag with a regular expression.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod pattern;
pub mod structural;
