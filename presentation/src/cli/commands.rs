//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every provider's answer followed by the summary
    Full,
    /// Only the summary
    Summary,
    /// The JSON payload the HTTP API returns
    Json,
}

impl From<OutputFormat> for omni_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => omni_domain::OutputFormat::Full,
            OutputFormat::Summary => omni_domain::OutputFormat::Summary,
            OutputFormat::Json => omni_domain::OutputFormat::Json,
        }
    }
}

/// Summary policy override
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryMode {
    /// Truncated concatenation of every answer
    Concat,
    /// Ask the configured summary provider
    Model,
}

impl SummaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMode::Concat => "concat",
            SummaryMode::Model => "model",
        }
    }
}

/// CLI arguments for omni-ai
#[derive(Parser, Debug)]
#[command(name = "omni-ai")]
#[command(author, version, about = "Ask several LLM providers at once and merge their answers")]
#[command(long_about = r#"
Omni AI sends one question to every configured LLM provider concurrently and
returns all answers together with a summary.

Without a QUESTION the HTTP service is started (POST /ask, POST /summary).
With a QUESTION a single run is performed and printed.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./omni.toml         Project-level config
3. ~/.config/omni-ai/config.toml   Global config
OMNI_* environment variables override all files (OMNI_SERVER__BIND=...).

Example:
  omni-ai
  omni-ai --bind 0.0.0.0:8000
  omni-ai "What's the best way to handle errors in Rust?"
  omni-ai --output json --summary model "Compare async runtimes"
"#)]
pub struct Cli {
    /// The question to ask (omit to start the HTTP server)
    pub question: Option<String>,

    /// Output format for one-shot runs
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Summary policy (overrides [aggregation] summary)
    #[arg(long, value_enum)]
    pub summary: Option<SummaryMode>,

    /// Address to serve on (overrides [server] bind)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
