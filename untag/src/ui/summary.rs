//! Human-readable summaries of sanitize reports, printed to stderr.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{self, Write};

use untag_core::ReportSummary;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn cell_color(theme: &ThemeMap, entry: ThemeEntry) -> Color {
    use owo_colors::AnsiColors as A;
    match color_for(theme, entry) {
        A::Black => Color::Black,
        A::Red => Color::DarkRed,
        A::Green => Color::DarkGreen,
        A::Yellow => Color::DarkYellow,
        A::Blue => Color::DarkBlue,
        A::Magenta => Color::DarkMagenta,
        A::Cyan => Color::DarkCyan,
        A::White => Color::White,
        A::BrightBlack => Color::DarkGrey,
        A::BrightRed => Color::Red,
        A::BrightGreen => Color::Green,
        A::BrightYellow => Color::Yellow,
        A::BrightBlue => Color::Blue,
        A::BrightMagenta => Color::Magenta,
        A::BrightCyan => Color::Cyan,
        _ => Color::White,
    }
}

/// Builds the summary table; colours are only attached when requested.
pub fn build_summary_table(summary: &ReportSummary, theme: &ThemeMap, supports_color: bool) -> Table {
    let mut rows: Vec<(&str, String)> = vec![
        ("Inputs", summary.inputs.to_string()),
        ("Verbatim", summary.verbatim.to_string()),
        ("Structural", summary.structural.to_string()),
        ("Pattern fallback", summary.pattern.to_string()),
        ("Empty", summary.empty.to_string()),
        ("Tags removed", summary.tags_removed.to_string()),
        ("Bytes in", summary.input_bytes.to_string()),
        ("Bytes out", summary.output_bytes.to_string()),
    ];
    for reason in &summary.fallback_reasons {
        rows.push(("Fallback reason", reason.clone()));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    if !supports_color {
        table.force_no_tty();
    }
    for (label, value) in rows {
        let mut label_cell = Cell::new(label);
        let mut value_cell = Cell::new(value);
        if supports_color {
            label_cell = label_cell.fg(cell_color(theme, ThemeEntry::SummaryLabel));
            value_cell = value_cell.fg(cell_color(theme, ThemeEntry::SummaryValue));
        }
        table.add_row(vec![label_cell, value_cell]);
    }
    table
}

pub fn print_summary(
    summary: &ReportSummary,
    writer: &mut dyn Write,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "\nSanitization Summary:")?;
    writeln!(writer, "{}", build_summary_table(summary, theme, supports_color))
}
