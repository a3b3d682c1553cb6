//! CLI argument definitions.

use crate::cli::validators::{parse_log_level, parse_milliseconds};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Automatic voice onset time decoding into Praat TextGrids.
#[derive(Debug, Parser)]
#[command(name = "autovot-decode")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Decoding options.
    #[command(flatten)]
    pub decode: DecodeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for decoding one recording.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// WAV recording.
    #[arg(required = true)]
    pub wav_filename: Option<String>,

    /// TextGrid with the VOT (and optional window) tier; the AutoVOT tier is appended to it.
    #[arg(required = true)]
    pub textgrid_filename: Option<String>,

    /// Trained model file.
    #[arg(required = true)]
    pub model_filename: Option<String>,

    /// Name of the tier to extract VOTs from [default: vot].
    #[arg(long, alias = "vot_tier", env = "AUTOVOT_VOT_TIER")]
    pub vot_tier: Option<String>,

    /// VOT mark value (e.g. "pos", "neg") or "*" for any string [default: *].
    #[arg(long, alias = "vot_mark", env = "AUTOVOT_VOT_MARK")]
    pub vot_mark: Option<String>,

    /// Tier whose intervals are used as search windows.
    /// If not given, a constant window [window-min, window-max] around the
    /// labeled VOT right boundary is used.
    #[arg(long, alias = "window_tier")]
    pub window_tier: Option<String>,

    /// Window mark value or "*" for any string.
    #[arg(long, alias = "window_mark", default_value = "")]
    pub window_mark: String,

    /// Window left boundary in ms relative to the VOT right boundary [default: -50].
    #[arg(long, alias = "window_min", allow_negative_numbers = true, value_parser = parse_milliseconds)]
    pub window_min: Option<f64>,

    /// Window right boundary in ms relative to the VOT right boundary [default: 800].
    #[arg(long, alias = "window_max", allow_negative_numbers = true, value_parser = parse_milliseconds)]
    pub window_max: Option<f64>,

    /// Minimum allowed length of a predicted VOT in ms [default: 15].
    #[arg(long, alias = "min_vot_length")]
    pub min_vot_length: Option<u32>,

    /// Maximum allowed length of a predicted VOT in ms [default: 250].
    #[arg(long, alias = "max_vot_length")]
    pub max_vot_length: Option<u32>,

    /// Print-out level (DEBUG, INFO, WARNING or ERROR). DEBUG keeps the working directory.
    #[arg(long, alias = "logging_level", default_value = "INFO", value_parser = parse_log_level)]
    pub logging_level: LogLevel,

    /// Feature extraction front end executable.
    #[arg(long, env = "AUTOVOT_FRONT_END")]
    pub front_end: Option<String>,

    /// VOT decoder executable.
    #[arg(long, env = "AUTOVOT_DECODER")]
    pub decoder: Option<String>,

    /// Keep the working directory at any log level.
    #[arg(long)]
    pub keep_workdir: bool,

    /// Replace an existing AutoVOT tier instead of appending another one.
    #[arg(long, conflicts_with = "refuse_existing")]
    pub overwrite: bool,

    /// Fail without running the tools if the TextGrid already has an AutoVOT tier.
    #[arg(long)]
    pub refuse_existing: bool,

    /// Configuration file (default: platform config directory).
    #[arg(long, env = "AUTOVOT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Verbosity shared by this tool and the external binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, and keep intermediate files.
    Debug,
    /// Progress messages.
    #[default]
    Info,
    /// Warnings and errors.
    Warning,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Level name as understood by the external tools.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Matching `tracing` filter directive.
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            other => Err(format!(
                "unknown logging level: {other} (expected DEBUG, INFO, WARNING or ERROR)"
            )),
        }
    }
}
