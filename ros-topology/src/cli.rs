use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ros-topology")]
#[command(about = "Compile router topology models into RouterOS scripts")]
pub struct Cli {
    /// Log planning decisions at info level.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub debug: bool,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug"])]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compile a topology model into a RouterOS script.
    Compile(CompileArgs),
    /// Check a topology model and report errors and warnings.
    Verify(VerifyArgs),
    /// Show the resolved VLAN, failover and policy plan.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Topology model (.toml or .json).
    pub model: PathBuf,
    /// Write the script here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emitter profile TOML overriding the embedded default.
    #[arg(long)]
    pub profile: Option<PathBuf>,
    /// Route only as many uplinks as there are probe addresses instead of failing.
    #[arg(long)]
    pub truncate_uplinks: bool,
    /// Require a policy-routing mapping for every network.
    #[arg(long)]
    pub strict_policy: bool,
    /// Timestamp for the generation comment (RFC 3339). Defaults to now.
    #[arg(long)]
    pub generated_at: Option<DateTime<Utc>>,
    /// Print section counts to stderr after writing.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Topology model to verify.
    pub model: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Emitter profile TOML overriding the embedded default.
    #[arg(long)]
    pub profile: Option<PathBuf>,
    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
    /// Require a policy-routing mapping for every network.
    #[arg(long)]
    pub strict_policy: bool,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Topology model to plan.
    pub model: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Emitter profile TOML overriding the embedded default.
    #[arg(long)]
    pub profile: Option<PathBuf>,
    /// Route only as many uplinks as there are probe addresses instead of failing.
    #[arg(long)]
    pub truncate_uplinks: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Default log filter selected by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
