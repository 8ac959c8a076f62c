//! CLI argument definitions for the pollform checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pollform_fields::ValidationReason;

#[derive(Parser)]
#[command(
    name = "pollform",
    version,
    about = "Validate pollform form definitions",
    long_about = "Build the fields declared in a JSON form definition, run their\n\
                  validators, and report every problem per field and location.\n\
                  Exits nonzero when any error-level problem remains."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a form definition and report its problems.
    Check(CheckArgs),

    /// List all field kinds the engine knows about.
    Kinds,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the JSON form definition.
    #[arg(value_name = "FORM")]
    pub form: PathBuf,

    /// Validation reason passed to every validator.
    #[arg(long = "reason", value_enum, default_value = "submit")]
    pub reason: ReasonArg,

    /// Print a plain-text sketch of each field before the problem table.
    #[arg(long = "sketch")]
    pub sketch: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReasonArg {
    Change,
    Blur,
    Submit,
}

impl From<ReasonArg> for ValidationReason {
    fn from(reason: ReasonArg) -> Self {
        match reason {
            ReasonArg::Change => ValidationReason::Change,
            ReasonArg::Blur => ValidationReason::Blur,
            ReasonArg::Submit => ValidationReason::Submit,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
