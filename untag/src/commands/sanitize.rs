//! `untag sanitize`: markup in, plain text out.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use untag_core::{ReportSummary, SanitizeReport, Sanitizer};

use crate::commands::{success_msg, warn_msg};
use crate::ui::diff_viewer;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::input::{read_input, source_label};

/// Options for a single `sanitize` run.
#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    pub input_file: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub clipboard: bool,
    pub diff: bool,
    pub no_summary: bool,
    pub quiet: bool,
    pub line_buffered: bool,
}

impl SanitizeOptions {
    /// Line-buffered output can go straight to stdout only when nothing
    /// needs the whole result afterwards.
    fn can_stream(&self) -> bool {
        self.line_buffered && !self.diff && !self.clipboard && self.output_path.is_none()
    }
}

pub fn run_sanitize(sanitizer: &Sanitizer, opts: &SanitizeOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting sanitize operation.");
    let source = source_label(opts.input_file.as_deref());

    if opts.can_stream() {
        debug!("Streaming {} line by line.", source);
        let reader: Box<dyn BufRead> = match &opts.input_file {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };
        let stdout = io::stdout();
        let reports = run_line_buffered(sanitizer, reader, &mut stdout.lock())?;
        handle_summary(&reports, opts, theme)?;
        info!("Sanitize operation completed.");
        return Ok(());
    }

    let input = read_input(opts.input_file.as_deref())?;
    let (text, reports) = if opts.line_buffered {
        let mut buf = Vec::with_capacity(input.len());
        let reports = run_line_buffered(sanitizer, io::Cursor::new(input.as_bytes()), &mut buf)?;
        (String::from_utf8_lossy(&buf).into_owned(), reports)
    } else {
        let report = sanitizer.sanitize_with_report(Some(&input));
        (report.text.clone(), vec![report])
    };
    debug!(
        "Sanitized {}. Original length: {}, plain text length: {}",
        source,
        input.len(),
        text.len()
    );

    handle_primary_output(opts, &input, &text, theme)?;
    if opts.clipboard {
        handle_clipboard_output(&text, opts, theme);
    }
    handle_summary(&reports, opts, theme)?;

    info!("Sanitize operation completed.");
    Ok(())
}

/// Sanitizes `reader` one line at a time, writing each result followed by its
/// original terminator and flushing so downstream pipes see output immediately.
pub fn run_line_buffered<R: BufRead>(
    sanitizer: &Sanitizer,
    mut reader: R,
    writer: &mut dyn Write,
) -> Result<Vec<SanitizeReport>> {
    let mut reports = Vec::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let read = reader.read_until(b'\n', &mut raw).context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        let (report, terminator) = sanitizer.sanitize_line(&line);
        write!(writer, "{}{}", report.text, terminator)?;
        writer.flush()?;
        reports.push(report);
    }
    Ok(reports)
}

fn handle_primary_output(opts: &SanitizeOptions, input: &str, text: &str, theme: &ThemeMap) -> Result<()> {
    if let Some(path) = &opts.output_path {
        info!("Writing plain text to file: {}", path.display());
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if opts.diff {
            diff_viewer::print_diff(input, text, &mut file, theme, false)?;
        } else {
            write_text(&mut file, text, opts.line_buffered)?;
        }
        if !opts.quiet {
            success_msg(format!("Plain text written to {}", path.display()), theme);
        }
    } else {
        debug!("Writing plain text to stdout.");
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        if opts.diff {
            diff_viewer::print_diff(input, text, &mut writer, theme, supports_color)?;
        } else {
            write_text(&mut writer, text, opts.line_buffered)?;
        }
    }
    Ok(())
}

/// Line-buffered text already carries each line's own terminator.
fn write_text(writer: &mut dyn Write, text: &str, line_buffered: bool) -> io::Result<()> {
    if line_buffered {
        write!(writer, "{}", text)
    } else {
        writeln!(writer, "{}", text)
    }
}

fn handle_clipboard_output(text: &str, opts: &SanitizeOptions, theme: &ThemeMap) {
    match copy_to_clipboard(text) {
        Ok(()) => {
            if !opts.quiet {
                success_msg("Plain text copied to clipboard.", theme);
            }
        }
        Err(e) => warn_msg(format!("Failed to copy to clipboard: {:#}", e), theme),
    }
}

fn handle_summary(reports: &[SanitizeReport], opts: &SanitizeOptions, theme: &ThemeMap) -> Result<()> {
    if opts.no_summary || opts.quiet {
        return Ok(());
    }
    debug!("Displaying sanitization summary.");
    let totals: ReportSummary = reports.iter().collect();
    let stderr_supports_color = io::stderr().is_terminal();
    summary::print_summary(&totals, &mut io::stderr(), theme, stderr_supports_color)?;
    Ok(())
}
