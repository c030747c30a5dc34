//! errors.rs - Custom error types for the untag-core library.
//!
//! Engines report failures through [`UntagError`]. The sanitizer never lets
//! these reach its caller: an engine error is recorded as the reason the
//! pattern fallback ran. Config validation reports through `InvalidConfig`.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `untag-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UntagError {
    #[error("Structural parser is not available: {0}")]
    ParserUnavailable(String),

    #[error("Input of {0} bytes exceeds the structural parse limit of {1} bytes")]
    InputTooLarge(usize, usize),

    #[error("Strict parse rejected the markup ({0} error(s)): {1}")]
    StrictParse(usize, String),

    /// Engine name and panic message.
    #[error("The {0} engine panicked: {1}")]
    EnginePanicked(String, String),

    /// One line per problem found by `SanitizerConfig::validate`.
    #[error("Config validation failed:\n{0}")]
    InvalidConfig(String),
}
