// untag-core/src/engine.rs
//! Defines the core `MarkupEngine` trait and the availability slot that holds
//! an optional engine.
//!
//! An engine turns a markup string into plain text. The sanitizer composes
//! two of them: a structural engine that may be missing or may fail, and a
//! pattern engine that always succeeds.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::UntagError;

/// A trait that defines a single markup-to-text extraction method.
pub trait MarkupEngine: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Extracts the visible text from `markup`.
    ///
    /// Implementations may fail; the caller decides whether a failure is
    /// recoverable.
    fn extract_text(&self, markup: &str) -> Result<String, UntagError>;
}

/// Holds an engine that may not have been constructed.
///
/// Consumers must check availability before use; a missing engine is a
/// normal state, not a null reference.
pub enum EngineSlot {
    Available(Box<dyn MarkupEngine>),
    Unavailable { reason: String },
}

impl EngineSlot {
    /// Wraps the result of a fallible constructor.
    pub fn from_result<E: MarkupEngine + 'static>(result: Result<E, UntagError>) -> Self {
        match result {
            Ok(engine) => EngineSlot::Available(Box::new(engine)),
            Err(e) => {
                log::debug!("Engine unavailable: {}", e);
                EngineSlot::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, EngineSlot::Available(_))
    }

    pub fn engine_name(&self) -> Option<&'static str> {
        match self {
            EngineSlot::Available(engine) => Some(engine.name()),
            EngineSlot::Unavailable { .. } => None,
        }
    }
}

impl std::fmt::Debug for EngineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineSlot::Available(engine) => write!(f, "Available({})", engine.name()),
            EngineSlot::Unavailable { reason } => write!(f, "Unavailable({})", reason),
        }
    }
}
