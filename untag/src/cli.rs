//! This file defines the command-line interface (CLI) for the untag application,
//! including all available commands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use untag_core::{ConfigOverrides, EngineChoice, PostProcessingOverrides};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "untag",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert markup into plain text",
    long_about = "untag extracts the visible text from HTML-like markup. It parses the input as an HTML5 fragment and returns its text content with entities decoded; if that parse cannot run, it strips anything shaped like a tag and leaves entities untouched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG asks for it
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// Path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts an input file or stdin to plain text.
    #[command(about = "Converts an input file or stdin to plain text.")]
    Sanitize(SanitizeCommand),

    /// Reports how an input would be converted without printing the text.
    #[command(about = "Reports how an input would be converted without printing the text.")]
    Scan(ScanCommand),

    /// Inspects and validates configuration files.
    #[command(subcommand, about = "Inspects and validates configuration files.")]
    Config(ConfigCommand),
}

/// Flags shared by every command that sanitizes input.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Path to a YAML config file.
    #[arg(long = "config", value_name = "FILE", env = "UNTAG_CONFIG", help = "Path to a YAML config file.")]
    pub config: Option<PathBuf>,

    /// Select which extraction engine to use.
    #[arg(long = "engine", value_name = "ENGINE", help = "Select the extraction engine ('auto' or 'pattern').")]
    pub engine: Option<EngineArg>,

    /// Omit the text of these elements (comma-separated), structural engine only.
    #[arg(long = "ignore", value_name = "ELEMENTS", value_delimiter = ',', help = "Omit the text of these elements (comma-separated).")]
    pub ignore: Vec<String>,

    /// Structural parse errors trigger the pattern fallback.
    #[arg(long = "strict", help = "Fall back to pattern stripping on any HTML parse error.")]
    pub strict: bool,

    /// Strip ANSI escape codes from the input first.
    #[arg(long = "strip-ansi", help = "Strip ANSI escape codes from the input first.")]
    pub strip_ansi: bool,

    /// Replace runs of whitespace with a single space.
    #[arg(long = "collapse-whitespace", help = "Replace runs of whitespace with a single space.")]
    pub collapse_whitespace: bool,

    /// Trim leading and trailing whitespace from the output.
    #[arg(long = "trim", help = "Trim leading and trailing whitespace from the output.")]
    pub trim: bool,

    /// Sanitize each line independently (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,
}

impl EngineArgs {
    /// Turns the flags into config overrides. Absent flags override nothing.
    pub fn to_overrides(&self) -> ConfigOverrides {
        let flag = |set: bool| if set { Some(true) } else { None };
        let post_processing = PostProcessingOverrides {
            strip_ansi: flag(self.strip_ansi),
            collapse_whitespace: flag(self.collapse_whitespace),
            trim: flag(self.trim),
        };
        ConfigOverrides {
            engine: self.engine.map(EngineChoice::from),
            max_structural_bytes: None,
            strict: flag(self.strict),
            ignored_elements: if self.ignore.is_empty() { None } else { Some(self.ignore.clone()) },
            post_processing: Some(post_processing),
        }
    }
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write plain text to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Copy the plain text to the system clipboard.
    #[arg(long, short = 'c', help = "Copy the plain text to the system clipboard.")]
    pub clipboard: bool,

    /// Show a unified diff between the markup and the plain text.
    #[arg(long, short = 'D', help = "Show a unified diff between the markup and the plain text.")]
    pub diff: bool,

    /// Suppress the summary table.
    #[arg(long = "no-summary", help = "Suppress the summary table.")]
    pub no_summary: bool,

    #[command(flatten)]
    pub engine_args: EngineArgs,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Export the report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the report as JSON to stdout.
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the report as JSON to stdout.")]
    pub json_stdout: bool,

    /// Exit with an error if any input needed the pattern fallback.
    #[arg(long = "fail-on-fallback", help = "Exit with a non-zero code if the pattern fallback was used.")]
    pub fail_on_fallback: bool,

    #[command(flatten)]
    pub engine_args: EngineArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    #[command(about = "Prints the effective configuration as YAML.")]
    Show {
        #[arg(long = "config", value_name = "FILE", env = "UNTAG_CONFIG", help = "Path to a YAML config file.")]
        config: Option<PathBuf>,
    },
    #[command(about = "Validates a YAML configuration file.")]
    Validate {
        #[arg(value_name = "FILE", help = "The configuration file to validate.")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EngineArg {
    /// Structural parse with pattern fallback.
    Auto,
    /// Pattern stripping only.
    Pattern,
}

impl From<EngineArg> for EngineChoice {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Auto => EngineChoice::Auto,
            EngineArg::Pattern => EngineChoice::Pattern,
        }
    }
}
