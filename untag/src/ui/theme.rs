//! Colour theme for untag's terminal output.
//!
//! Each logical element of the output (messages, diff lines, summary cells)
//! maps to an optional 16-colour ANSI foreground. Users can override any
//! subset with a YAML file passed via `--theme`; missing entries keep their
//! defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    SummaryLabel,
    SummaryValue,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::DiffAdded,
        ThemeEntry::DiffRemoved,
        ThemeEntry::DiffHeader,
        ThemeEntry::SummaryLabel,
        ThemeEntry::SummaryValue,
    ];

    fn default_color(self) -> &'static str {
        match self {
            ThemeEntry::Header | ThemeEntry::DiffHeader => "cyan",
            ThemeEntry::Success | ThemeEntry::DiffAdded => "green",
            ThemeEntry::Warn => "yellow",
            ThemeEntry::Error | ThemeEntry::DiffRemoved => "red",
            ThemeEntry::SummaryLabel => "brightblack",
            ThemeEntry::Info | ThemeEntry::SummaryValue => "white",
        }
    }
}

/// A named ANSI colour, e.g. "red" or "brightgreen".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    Named(String),
}

#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white"
            | "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue"
            | "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// Loads the theme at `theme_path`, or the defaults when no path is given.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => load_theme_file(path),
        None => Ok(default_theme_map()),
    }
}

/// Reads a YAML theme and fills unspecified entries from the defaults.
pub fn load_theme_file(path: &Path) -> Result<ThemeMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let custom: ThemeMap = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

    for style in custom.values() {
        if let Some(ThemeColor::Named(name)) = &style.fg {
            name.parse::<ThemeColor>()
                .with_context(|| format!("Theme file {} uses unknown color '{}'", path.display(), name))?;
        }
    }

    let mut theme = default_theme_map();
    theme.extend(custom);
    Ok(theme)
}

pub fn default_theme_map() -> ThemeMap {
    ThemeEntry::ALL
        .iter()
        .map(|entry| {
            (
                *entry,
                ThemeStyle { fg: Some(ThemeColor::Named(entry.default_color().into())) },
            )
        })
        .collect()
}

/// The colour for `entry`, falling back to white.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> AnsiColors {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
        .unwrap_or(AnsiColors::White)
}
