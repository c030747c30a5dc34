//! `untag config show|validate`.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use untag_core::SanitizerConfig;

use crate::commands::success_msg;
use crate::ui::theme::ThemeMap;

/// Prints the effective configuration (defaults merged with any user file) as YAML.
pub fn run_show(config_path: Option<&Path>) -> Result<()> {
    let config = SanitizerConfig::load_effective(config_path)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

/// Loads and validates `path`; any problem is returned as an error.
pub fn run_validate(path: &Path, quiet: bool, theme: &ThemeMap) -> Result<()> {
    info!("Validating config file: {}", path.display());
    SanitizerConfig::load_from_file(path)
        .with_context(|| format!("Configuration '{}' is invalid", path.display()))?;
    if !quiet {
        success_msg(format!("Configuration '{}' is valid.", path.display()), theme);
    }
    Ok(())
}
