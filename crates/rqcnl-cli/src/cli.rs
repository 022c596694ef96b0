//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// rqcnl - Turn research questions into EC/PC templates.
#[derive(Debug, Parser)]
#[command(name = "rqcnl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Parse service endpoint (overrides the configuration file)
    #[arg(short, long, global = true, env = "RQCNL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Vocabulary preset (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    pub preset: Option<PresetArg>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (templates only)
    Quiet,
}

/// Vocabulary presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Extended rejection sets, only do-support auxiliaries attach
    Default,
    /// Smaller rejection sets, auxiliaries screened like predicates
    Baseline,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Template a single question
    Template(TemplateArgs),

    /// Template questions read one per line
    Batch(BatchArgs),

    /// Group templates into patterns and count recurring chunks
    Patterns(PatternsArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the template command.
#[derive(Debug, Parser)]
pub struct TemplateArgs {
    /// Question to template
    pub question: String,
}

/// Where to read questions from.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// File with one question per line
    #[arg(short = 'i', long)]
    pub file: Option<String>,

    /// Read questions from stdin, one per line
    #[arg(long)]
    pub stdin: bool,

    /// Template on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the patterns command.
#[derive(Debug, Parser)]
pub struct PatternsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Maximum number of patterns to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for rqcnl_chunker::ChunkerConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => rqcnl_chunker::ChunkerConfig::default(),
            PresetArg::Baseline => rqcnl_chunker::ChunkerConfig::baseline(),
        }
    }
}
