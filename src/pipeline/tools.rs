//! External feature extraction and decoding tools.

use crate::cli::LogLevel;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Decoder limits forwarded on the command line, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum onset searched.
    pub max_onset: u32,
    /// Minimum predicted VOT length.
    pub min_vot_length: u32,
    /// Maximum predicted VOT length.
    pub max_vot_length: u32,
}

/// Arguments for the feature extraction front end.
pub fn front_end_args(
    level: LogLevel,
    input: &Path,
    feature_list: &Path,
    labels: &Path,
) -> Vec<OsString> {
    vec![
        "-verbose".into(),
        level.as_str().into(),
        input.into(),
        feature_list.into(),
        labels.into(),
    ]
}

/// Arguments for the VOT decoder.
pub fn decoder_args(
    level: LogLevel,
    limits: DecodeLimits,
    preds: &Path,
    feature_list: &Path,
    labels: &Path,
    model: &Path,
) -> Vec<OsString> {
    vec![
        "-verbose".into(),
        level.as_str().into(),
        "-max_onset".into(),
        limits.max_onset.to_string().into(),
        "-min_vot_length".into(),
        limits.min_vot_length.to_string().into(),
        "-max_vot_length".into(),
        limits.max_vot_length.to_string().into(),
        "-output_predictions".into(),
        preds.into(),
        feature_list.into(),
        labels.into(),
        model.into(),
    ]
}

/// Run `program` to completion, inheriting stdout and stderr.
///
/// # Errors
///
/// [`Error::ToolSpawn`] if it cannot be started, [`Error::ToolFailed`] if it
/// exits unsuccessfully.
pub fn run_tool(program: &str, args: &[OsString]) -> Result<()> {
    debug!(
        "Running: {} {}",
        program,
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| Error::ToolSpawn {
            program: program.to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            program: program.to_string(),
            status: status.to_string(),
        });
    }

    info!("{program} finished");
    Ok(())
}
