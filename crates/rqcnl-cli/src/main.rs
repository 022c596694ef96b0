//! rqcnl - template research questions from the command line.

use clap::Parser;
use rqcnl_chunker::TemplateGenerator;
use rqcnl_cli::commands;
use rqcnl_cli::{Cli, Command, Config, Formatter};
use rqcnl_parser::SpacyHttpParser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> rqcnl_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    debug!("Loaded configuration from {}", config_path.display());

    if let Some(endpoint) = cli.endpoint {
        config.parser.endpoint = endpoint;
    }
    if let Some(preset) = cli.preset {
        config.chunker = preset.into();
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, cli.preset, &formatter)?;
        }
        Command::Template(args) => {
            commands::execute_template(args, &generator(&config)?, &formatter)?;
        }
        Command::Batch(args) => {
            commands::execute_batch(args, &generator(&config)?, &formatter)?;
        }
        Command::Patterns(args) => {
            commands::execute_patterns(args, &generator(&config)?, &formatter)?;
        }
    }

    Ok(())
}

fn generator(config: &Config) -> rqcnl_cli::Result<TemplateGenerator<SpacyHttpParser>> {
    let parser = config.build_parser()?;
    Ok(TemplateGenerator::new(parser, &config.chunker)?)
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}
