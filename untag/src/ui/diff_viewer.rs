//! Unified diff between the original markup and the extracted text.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Writes a line-oriented diff of `original` against `sanitized`.
///
/// Removed lines are prefixed `-`, added lines `+`, context lines two spaces.
pub fn print_diff(
    original: &str,
    sanitized: &str,
    writer: &mut dyn Write,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    let header = "--- Diff View ---";
    if supports_color {
        writeln!(writer, "{}", header.color(color_for(theme, ThemeEntry::DiffHeader)))?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            let (prefix, text, entry) = match line {
                DiffLine::Delete(s) => ("-", *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ("+", *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (" ", *s, None),
            };
            changed |= entry.is_some();
            let rendered = format!("{} {}", prefix, text.trim_end_matches('\n'));
            match entry {
                Some(entry) if supports_color => {
                    writeln!(writer, "{}", rendered.color(color_for(theme, entry)))?
                }
                _ => writeln!(writer, "{}", rendered)?,
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes detected.")?;
    }
    let footer = "-----------------";
    if supports_color {
        writeln!(writer, "{}", footer.color(color_for(theme, ThemeEntry::DiffHeader)))
    } else {
        writeln!(writer, "{}", footer)
    }
}
