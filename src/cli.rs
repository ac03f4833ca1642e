//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, init, validate, lookup, health), and their
//! associated argument structs. Every flag has an environment variable
//! equivalent for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "extdir",
    version,
    about = "PBX extension tenant directory for IVR call handling",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        extdir init                      Create a starter tenants file\n  \
        extdir run                       Serve with ./extdir.yaml\n  \
        extdir run -c tenants.yaml       Serve a specific file\n  \
        extdir lookup 4033               Resolve one extension locally"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the directory over HTTP
    Run(RunArgs),

    /// Generate a starter tenants file
    Init(InitArgs),

    /// Validate a tenants file without serving
    Validate(ValidateArgs),

    /// Resolve one extension from a local tenants file
    Lookup(LookupArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        extdir run                                 Auto-detect tenants file\n  \
        extdir run -c tenants.yaml                 Specific tenants file\n  \
        extdir run -c tenants.yaml -p 4570 --pretty  Local dev mode")]
pub struct RunArgs {
    /// Tenants file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 4570)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Directory refresh interval in seconds
    #[arg(
        long,
        env = "POLL_INTERVAL_SECS",
        default_value_t = 30,
        help_heading = "Tuning"
    )]
    pub poll_interval: u64,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        extdir init                          Quick start tenants file (yaml)\n  \
        extdir init -i                       Interactive wizard\n  \
        extdir init -f toml -o tenants.toml  Non-interactive, TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include full documentation as comments (non-interactive only)
    #[arg(long, conflicts_with = "interactive")]
    pub full: bool,

    /// Launch interactive wizard to build a tenants file step by step
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Tenants file to validate
    #[arg(default_value = "extdir.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        extdir lookup 4033                   Resolve against ./extdir.yaml\n  \
        extdir lookup 4033 -c tenants.json   Specific tenants file\n  \
        extdir lookup 4033 --json            Full record as JSON")]
pub struct LookupArgs {
    /// Extension to resolve (exact match, no normalization)
    pub extension: String,

    /// Tenants file to resolve against
    #[arg(short, long, default_value = "extdir.yaml")]
    pub config: PathBuf,

    /// Output the full record as JSON
    #[arg(long)]
    pub json: bool,

    /// Show secret fields in text output instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:4570")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
