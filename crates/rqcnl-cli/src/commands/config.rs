//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs, PresetArg};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `config` is the effective configuration, `path` the file it came from.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    preset: Option<PresetArg>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, formatter),
        ConfigAction::Init { force } => init_config(path, preset, force, formatter),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Print the effective configuration.
fn show_config(config: &Config, formatter: &Formatter) -> Result<()> {
    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        _ => print!("{}", config.to_toml()?),
    }
    Ok(())
}

/// Write a fresh configuration to `path`.
fn init_config(path: &Path, preset: Option<PresetArg>, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists, use --force to overwrite",
            path.display()
        )));
    }

    let config = Config {
        chunker: preset.map(Into::into).unwrap_or_default(),
        ..Config::default()
    };
    config.save_to(path)?;

    println!(
        "{}",
        formatter.success(&format!("Wrote configuration to {}", path.display()))
    );
    Ok(())
}
