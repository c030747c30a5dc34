//! Coloured status messages on stderr.
//!
//! Colour is applied only when the caller says the stream supports it, so
//! redirected output stays free of escape codes.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn print_styled(
    writer: &mut dyn Write,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let line = format!("{}{}", prefix, msg);
    if supports_color {
        writeln!(writer, "{}", line.color(color_for(theme, entry)))
    } else {
        writeln!(writer, "{}", line)
    }
}

pub fn print_info_message(writer: &mut dyn Write, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message(writer: &mut dyn Write, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message(writer: &mut dyn Write, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message(writer: &mut dyn Write, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_styled(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}
