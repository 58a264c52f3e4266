//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// ensure-params - Check request parameters for required keys.
#[derive(Debug, Parser)]
#[command(name = "ensure-params")]
#[command(author, version, long_about = None)]
#[command(about = "Check request parameters for required keys")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .ensure-params.yml)
    #[arg(short, long, global = true, env = "ENSURE_PARAMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a parameter payload against requirement sets
    Check(CheckArgs),

    /// Validate the requirement sets in the configuration
    Lint(LintArgs),

    /// List configured requirement sets
    List(ListArgs),
}

/// Arguments for the `check` command.
///
/// Requirement sources are applied as a chain: named sets first, then spec
/// files, then inline literals, each in the order given.
#[derive(Debug, Clone, Default, clap::Args)]
#[command(group(ArgGroup::new("input").required(true).args(["params", "query"])))]
pub struct CheckArgs {
    /// Parameter file (.json, .yml/.yaml, or a query string otherwise)
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Parameters as a query string, e.g. "pet[name]=Toto"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Named requirement set from the configuration (repeatable)
    #[arg(short, long = "require", value_name = "NAME")]
    pub require: Vec<String>,

    /// Requirement spec file in YAML or JSON (repeatable)
    #[arg(long = "spec", value_name = "FILE")]
    pub spec: Vec<PathBuf>,

    /// Inline requirement literal, e.g. '{"pet": ["name"]}' (repeatable)
    #[arg(long = "inline", value_name = "LITERAL")]
    pub inline: Vec<String>,

    /// Output format: human, json (defaults to settings.default_format)
    #[arg(long)]
    pub format: Option<String>,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LintArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
