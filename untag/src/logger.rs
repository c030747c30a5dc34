//! Logger initialisation for the untag binary.
//!
//! Log lines go to stderr as `[LEVEL target] message`. `RUST_LOG` is honoured
//! unless a level is forced by a command-line flag.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Default filter when neither `RUST_LOG` nor a flag says otherwise.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialises the global logger. Safe to call more than once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });
    let _ = builder.try_init();
}

/// Maps the global CLI flags to a forced level, or `None` to defer to `RUST_LOG`.
///
/// `--quiet` wins over everything, `--disable-debug` wins over `--debug`.
pub fn level_from_flags(quiet: bool, debug: bool, disable_debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Error)
    } else if disable_debug {
        Some(LevelFilter::Info)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
