//! CLI argument definitions for the FMO planner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use facs_model::DEFAULT_VOLUME_PER_WELL;

#[derive(Parser)]
#[command(
    name = "fmo-planner",
    version,
    about = "FMO Planner - Compute antibody staining preparation plans",
    long_about = "Compute reagent preparation plans for flow-cytometry staining\n\
                  with fluorescence-minus-one (FMO) controls.\n\n\
                  Reads a reagent panel CSV and writes one preparation plan per\n\
                  antibody class, as a sectioned CSV and an Excel-openable workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the staining plan for a reagent panel.
    Plan(PlanArgs),

    /// List the antibody classes and the labels accepted for each.
    Classes,
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Path to the reagent panel CSV.
    #[arg(value_name = "PANEL_CSV")]
    pub panel: PathBuf,

    /// Number of stained samples per antibody class.
    #[arg(long = "samples", short = 's', value_name = "N")]
    pub samples: u32,

    /// Staining volume per well in µL.
    #[arg(
        long = "volume-per-well",
        value_name = "UL",
        default_value_t = DEFAULT_VOLUME_PER_WELL
    )]
    pub volume_per_well: f64,

    /// Output directory for generated files (default: output/ beside the panel).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Compute and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Xml,
    Both,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
