//! AutoVOT decoding - voice onset time prediction into Praat TextGrids.
//!
//! This crate drives the AutoVOT feature front end and decoder over the
//! windows labeled in a TextGrid and writes the predicted VOTs back as an
//! `AutoVOT` interval tier.

#![warn(missing_docs)]

pub mod annotation;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod stitch;

use annotation::{TierDefinitions, TierPolicy};
use clap::Parser;
use cli::{Cli, Command, ConfigAction, DecodeArgs, LogLevel};
use config::{Config, init_config_file, load_config, resolve_config_path, validate_config};
use pipeline::{DecodeLimits, DecodeOptions, decode};
use std::path::PathBuf;

pub use error::{Error, Result};

/// Main entry point for the autovot-decode CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.decode.logging_level);

    if let Some(command) = cli.command {
        return handle_command(command, &cli.decode);
    }

    let config = load_config(cli.decode.config.as_deref())?;
    let options = resolve_options(&cli.decode, config)?;
    decode(&options)?;
    Ok(())
}

/// Merge CLI arguments over the loaded configuration.
///
/// Precedence: flag or environment, then config file, then built-in defaults.
pub fn resolve_options(args: &DecodeArgs, mut config: Config) -> Result<DecodeOptions> {
    let defaults = &mut config.defaults;
    if let Some(tier) = &args.vot_tier {
        defaults.vot_tier.clone_from(tier);
    }
    if let Some(mark) = &args.vot_mark {
        defaults.vot_mark.clone_from(mark);
    }
    if let Some(ms) = args.window_min {
        defaults.window_min_ms = ms;
    }
    if let Some(ms) = args.window_max {
        defaults.window_max_ms = ms;
    }
    if let Some(ms) = args.min_vot_length {
        defaults.min_vot_length_ms = ms;
    }
    if let Some(ms) = args.max_vot_length {
        defaults.max_vot_length_ms = ms;
    }
    if let Some(program) = &args.front_end {
        config.tools.front_end.clone_from(program);
    }
    if let Some(program) = &args.decoder {
        config.tools.decoder.clone_from(program);
    }

    validate_config(&config)?;

    let path = |value: &Option<String>| PathBuf::from(value.as_deref().unwrap_or_default());
    let defaults = &config.defaults;

    Ok(DecodeOptions {
        recording: path(&args.wav_filename),
        textgrid: path(&args.textgrid_filename),
        model: path(&args.model_filename),
        tiers: TierDefinitions::new(
            &defaults.vot_tier,
            &defaults.vot_mark,
            args.window_tier.as_deref(),
            &args.window_mark,
            defaults.window_min_ms,
            defaults.window_max_ms,
        ),
        limits: DecodeLimits {
            max_onset: config.tools.max_onset,
            min_vot_length: defaults.min_vot_length_ms,
            max_vot_length: defaults.max_vot_length_ms,
        },
        front_end: config.tools.front_end.clone(),
        decoder: config.tools.decoder.clone(),
        log_level: args.logging_level,
        keep_workdir: args.keep_workdir,
        tier_policy: if args.overwrite {
            TierPolicy::Replace
        } else if args.refuse_existing {
            TierPolicy::Refuse
        } else {
            TierPolicy::Append
        },
    })
}

fn init_logging(level: LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command, args: &DecodeArgs) -> Result<()> {
    match command {
        Command::Config { action } => {
            let path = resolve_config_path(args.config.as_deref())?;
            match action {
                ConfigAction::Init => {
                    if init_config_file(&path)? {
                        println!("Created configuration file: {}", path.display());
                    } else {
                        println!("Configuration file already exists: {}", path.display());
                    }
                }
                ConfigAction::Show => {
                    let config = load_config(args.config.as_deref())?;
                    println!("{config:#?}");
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
            Ok(())
        }
    }
}
