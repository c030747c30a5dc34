//! # untag CLI
//!
//! The command-line front end for `untag-core`: reads markup from a file or
//! stdin and writes its plain text, with optional diff, clipboard copy and
//! JSON reporting.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
