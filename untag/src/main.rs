//! untag entry point.
//!
//! Parses the command line, initialises logging and the theme, then hands
//! off to the selected command.

use anyhow::Result;
use clap::Parser;
use log::info;

use untag::cli::{Cli, Commands, ConfigCommand};
use untag::commands::{self, config, error_msg, sanitize, scan};
use untag::logger;
use untag::ui::theme::{build_theme_map, default_theme_map, ThemeMap};

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));
    info!("untag started. Version: {}", env!("CARGO_PKG_VERSION"));

    let theme = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{:#}", e), &default_theme_map());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, &theme) {
        error_msg(format!("{:#}", e), &theme);
        std::process::exit(1);
    }
}

fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    match cli.command {
        Commands::Sanitize(cmd) => {
            let sanitizer = commands::build_sanitizer(&cmd.engine_args)?;
            let opts = sanitize::SanitizeOptions {
                input_file: cmd.input_file,
                output_path: cmd.output,
                clipboard: cmd.clipboard,
                diff: cmd.diff,
                no_summary: cmd.no_summary,
                quiet: cli.quiet,
                line_buffered: cmd.engine_args.line_buffered,
            };
            sanitize::run_sanitize(&sanitizer, &opts, theme)
        }
        Commands::Scan(cmd) => {
            let sanitizer = commands::build_sanitizer(&cmd.engine_args)?;
            let opts = scan::ScanOptions {
                input_file: cmd.input_file,
                json_file: cmd.json_file,
                json_stdout: cmd.json_stdout,
                fail_on_fallback: cmd.fail_on_fallback,
                line_buffered: cmd.engine_args.line_buffered,
                quiet: cli.quiet,
            };
            scan::run_scan(&sanitizer, &opts, theme)
        }
        Commands::Config(ConfigCommand::Show { config: path }) => config::run_show(path.as_deref()),
        Commands::Config(ConfigCommand::Validate { path }) => config::run_validate(&path, cli.quiet, theme),
    }
}
