//! Configuration management for `untag-core`.
//!
//! This module defines the settings that drive the sanitizer: which engine
//! runs first, the limits placed on the structural parse, and the optional
//! post-processing applied to the extracted text. Settings are stored as YAML;
//! the built-in defaults are embedded in the binary and user files only need
//! to name the fields they change.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::UntagError;

/// Environment variable consulted for a config path when none is given explicitly.
pub const CONFIG_ENV_VAR: &str = "UNTAG_CONFIG";

/// Fallback structural parse limit when neither defaults nor user config set one.
pub const DEFAULT_MAX_STRUCTURAL_BYTES: usize = 8 * 1024 * 1024;

lazy_static! {
    static ref ELEMENT_NAME_RE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap();
}

/// Selects how the sanitizer extracts text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineChoice {
    /// Structural parse first, pattern stripping if it fails.
    #[default]
    Auto,
    /// Pattern stripping only.
    Pattern,
}

/// Optional clean-up applied to the text produced by either engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostProcessing {
    /// Remove ANSI escape sequences from the input before extraction.
    pub strip_ansi: bool,
    /// Replace every run of whitespace in the output with a single space.
    pub collapse_whitespace: bool,
    /// Trim leading and trailing whitespace from the output.
    pub trim: bool,
}

impl PostProcessing {
    pub fn is_noop(&self) -> bool {
        !self.strip_ansi && !self.collapse_whitespace && !self.trim
    }
}

/// The fully resolved sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub engine: EngineChoice,
    /// Inputs above this size skip the structural parse.
    pub max_structural_bytes: usize,
    /// Any html5ever parse error counts as a structural failure.
    pub strict: bool,
    /// Element names whose descendant text the structural engine omits.
    pub ignored_elements: Vec<String>,
    pub post_processing: PostProcessing,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Auto,
            max_structural_bytes: DEFAULT_MAX_STRUCTURAL_BYTES,
            strict: false,
            ignored_elements: Vec::new(),
            post_processing: PostProcessing::default(),
        }
    }
}

/// A partial configuration, as read from a user file or assembled from CLI flags.
///
/// Every field is optional; `None` leaves the underlying value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub engine: Option<EngineChoice>,
    pub max_structural_bytes: Option<usize>,
    pub strict: Option<bool>,
    pub ignored_elements: Option<Vec<String>>,
    pub post_processing: Option<PostProcessingOverrides>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostProcessingOverrides {
    pub strip_ansi: Option<bool>,
    pub collapse_whitespace: Option<bool>,
    pub trim: Option<bool>,
}

impl SanitizerConfig {
    /// Loads the settings embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default config from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: SanitizerConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a user file and merges it over the embedded defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let overrides = ConfigOverrides::load_from_file(path)?;
        let config = merge_config(Self::load_default()?, Some(overrides));
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config location (explicit path, `UNTAG_CONFIG`, then the
    /// user config directory) and loads it, or the defaults if nothing exists.
    pub fn load_effective(explicit: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit) {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("No user config found, using embedded defaults.");
                Self::load_default()
            }
        }
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.max_structural_bytes == 0 {
            errors.push("`max_structural_bytes` must be greater than 0.".to_string());
        }

        let mut seen = HashSet::new();
        for name in &self.ignored_elements {
            if !ELEMENT_NAME_RE.is_match(name) {
                errors.push(format!("Ignored element '{}' is not a valid element name.", name));
            } else if !seen.insert(name.to_ascii_lowercase()) {
                errors.push(format!("Duplicate ignored element found: '{}'.", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(UntagError::InvalidConfig(errors.join("\n")).into())
        }
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize config")
    }
}

impl ConfigOverrides {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading user config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Applies `overrides` on top of `base`.
///
/// Scalars are replaced. `ignored_elements` are unioned with the base list,
/// keeping the first spelling of each name.
pub fn merge_config(base: SanitizerConfig, overrides: Option<ConfigOverrides>) -> SanitizerConfig {
    let Some(user) = overrides else {
        return base;
    };
    let mut merged = base;

    if let Some(engine) = user.engine {
        debug!("Overriding engine with user value: {:?}", engine);
        merged.engine = engine;
    }
    if let Some(limit) = user.max_structural_bytes {
        debug!("Overriding structural byte limit with user value: {}", limit);
        merged.max_structural_bytes = limit;
    }
    if let Some(strict) = user.strict {
        merged.strict = strict;
    }
    if let Some(elements) = user.ignored_elements {
        let mut seen: HashSet<String> = merged
            .ignored_elements
            .iter()
            .map(|e| e.to_ascii_lowercase())
            .collect();
        for element in elements {
            if seen.insert(element.to_ascii_lowercase()) {
                merged.ignored_elements.push(element);
            }
        }
    }
    if let Some(pp) = user.post_processing {
        if let Some(v) = pp.strip_ansi {
            merged.post_processing.strip_ansi = v;
        }
        if let Some(v) = pp.collapse_whitespace {
            merged.post_processing.collapse_whitespace = v;
        }
        if let Some(v) = pp.trim {
            merged.post_processing.trim = v;
        }
    }

    merged
}

/// Returns the first existing config candidate, if any.
///
/// An explicit path is returned even when it does not exist so the caller
/// gets a read error rather than silently falling back to defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(from_env) = std::env::var(CONFIG_ENV_VAR) {
        if !from_env.trim().is_empty() {
            return Some(PathBuf::from(from_env));
        }
    }
    config_candidate_paths().into_iter().find(|p| p.is_file())
}

/// Locations searched for a user config file, in priority order.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    vec![
        dirs::config_dir().map(|p| p.join("untag").join("config.yaml")),
        dirs::home_dir().map(|p| p.join(".untag").join("config.yaml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
