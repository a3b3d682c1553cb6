//! End-to-end decoding of one recording.

use crate::annotation::{
    Annotation, TierDefinitions, TierPolicy, append_auto_vot_tier, extract_windows,
    prepare_output_tier,
};
use crate::audio::read_recording_info;
use crate::cli::LogLevel;
use crate::error::{Error, Result};
use crate::pipeline::files::{read_predictions, read_window_file, write_path_list, write_window_file};
use crate::pipeline::tools::{DecodeLimits, decoder_args, front_end_args, run_tool};
use crate::pipeline::workspace::Workspace;
use crate::stitch::stitch_predictions;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fully resolved settings for one decoding run.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Recording to analyze.
    pub recording: PathBuf,
    /// TextGrid to read windows from and append the tier to.
    pub textgrid: PathBuf,
    /// Trained classifier model.
    pub model: PathBuf,
    /// Tier and window rules.
    pub tiers: TierDefinitions,
    /// Limits forwarded to the decoder.
    pub limits: DecodeLimits,
    /// Front end executable.
    pub front_end: String,
    /// Decoder executable.
    pub decoder: String,
    /// Verbosity, also forwarded to the tools.
    pub log_level: LogLevel,
    /// Keep the scratch directory regardless of log level.
    pub keep_workdir: bool,
    /// Existing output tier handling.
    pub tier_policy: TierPolicy,
}

impl DecodeOptions {
    /// Whether the scratch directory should outlive the run.
    pub fn retain_workdir(&self) -> bool {
        self.keep_workdir || self.log_level == LogLevel::Debug
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    /// Number of VOTs written.
    pub vots: usize,
    /// How many of them are negative.
    pub negative: usize,
    /// Scratch directory, if it was kept.
    pub retained_workdir: Option<PathBuf>,
}

/// Check inputs before anything runs.
pub fn validate_inputs(options: &DecodeOptions) -> Result<()> {
    if options.recording.as_os_str().is_empty() && options.textgrid.as_os_str().is_empty() {
        return Err(Error::MissingInputs);
    }

    for (kind, path) in [
        ("recording", &options.recording),
        ("TextGrid", &options.textgrid),
        ("model", &options.model),
    ] {
        if !path.is_file() {
            return Err(Error::InputNotFound {
                kind,
                path: path.clone(),
            });
        }
    }

    if options.limits.min_vot_length >= options.limits.max_vot_length {
        return Err(Error::ConfigValidation {
            message: format!(
                "min VOT length ({} ms) must be less than max VOT length ({} ms)",
                options.limits.min_vot_length, options.limits.max_vot_length
            ),
        });
    }

    Ok(())
}

/// Decode VOTs for one recording and append the `AutoVOT` tier.
///
/// The TextGrid is written only after both tools succeeded and the stitched
/// tier passed its checks; any earlier failure leaves it untouched.
pub fn decode(options: &DecodeOptions) -> Result<DecodeResult> {
    let start = Instant::now();
    validate_inputs(options)?;

    let recording = read_recording_info(&options.recording)?;
    info!(
        "Recording: {} ({} Hz, {:.2}s)",
        options.recording.display(),
        recording.sample_rate,
        recording.duration_secs
    );

    let mut annotation = Annotation::read(&options.textgrid)?;
    if annotation.xmax() > recording.duration_secs {
        warn!(
            "TextGrid ends at {:.3}s but the recording lasts {:.3}s",
            annotation.xmax(),
            recording.duration_secs
        );
    }
    prepare_output_tier(&mut annotation, options.tier_policy)?;

    let windows = extract_windows(&annotation, &options.tiers)?;
    info!("Extracted {} analysis window(s)", windows.len());

    let workspace = Workspace::create(&options.recording, options.retain_workdir())?;
    write_path_list(&workspace.textgrid_list_file(), &[options.textgrid.as_path()])?;
    write_path_list(&workspace.wav_list_file(), &[options.recording.as_path()])?;
    write_window_file(&workspace.input_file(), &options.recording, &windows)?;
    write_path_list(
        &workspace.feature_list_file(),
        &workspace.feature_files(windows.len()),
    )?;

    run_front_end(options, &workspace)?;
    run_decoder(options, &workspace)?;

    let analysis_windows = read_window_file(&workspace.input_file())?;
    let predictions = read_predictions(&workspace.preds_file())?;
    debug!(
        "Read {} window(s) and {} prediction(s)",
        analysis_windows.len(),
        predictions.len()
    );

    let intervals = stitch_predictions(
        &analysis_windows,
        &predictions,
        annotation.xmin(),
        annotation.xmax(),
    )?;
    append_auto_vot_tier(&mut annotation, &intervals)?;

    let negative = predictions.iter().filter(|p| p.is_negative()).count();
    let retained_workdir = workspace
        .is_retained()
        .then(|| workspace.root().to_path_buf());
    if let Some(dir) = &retained_workdir {
        info!("Keeping working directory {}", dir.display());
    }

    info!(
        "Complete: {} VOT(s) ({} negative) in {:.2}s",
        predictions.len(),
        negative,
        start.elapsed().as_secs_f64()
    );

    Ok(DecodeResult {
        vots: predictions.len(),
        negative,
        retained_workdir,
    })
}

fn run_front_end(options: &DecodeOptions, workspace: &Workspace) -> Result<()> {
    info!("Extracting features...");
    let args = front_end_args(
        options.log_level,
        &workspace.input_file(),
        &workspace.feature_list_file(),
        &workspace.labels_file(),
    );
    run_tool(&options.front_end, &args)
}

fn run_decoder(options: &DecodeOptions, workspace: &Workspace) -> Result<()> {
    info!("Decoding VOTs...");
    let args = decoder_args(
        options.log_level,
        options.limits,
        &workspace.preds_file(),
        &workspace.feature_list_file(),
        &workspace.labels_file(),
        &options.model,
    );
    run_tool(&options.decoder, &args)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotation::MarkFilter;
    use std::path::Path;
    use tempfile::TempDir;

    fn options(dir: &Path) -> DecodeOptions {
        DecodeOptions {
            recording: dir.join("a.wav"),
            textgrid: dir.join("a.TextGrid"),
            model: dir.join("model.classifier"),
            tiers: TierDefinitions::new("vot", "*", None, "", -50.0, 800.0),
            limits: DecodeLimits {
                max_onset: 200,
                min_vot_length: 15,
                max_vot_length: 250,
            },
            front_end: "VotFrontEnd2".to_string(),
            decoder: "InitialVotDecode".to_string(),
            log_level: LogLevel::Info,
            keep_workdir: false,
            tier_policy: TierPolicy::Append,
        }
    }

    #[test]
    fn test_both_inputs_empty() {
        let mut opts = options(Path::new("/tmp"));
        opts.recording = PathBuf::new();
        opts.textgrid = PathBuf::new();
        assert!(matches!(validate_inputs(&opts), Err(Error::MissingInputs)));
    }

    #[test]
    fn test_missing_recording() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path());
        assert!(matches!(
            validate_inputs(&opts),
            Err(Error::InputNotFound {
                kind: "recording",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_vot_length() {
        let dir = TempDir::new().unwrap();
        for name in ["a.wav", "a.TextGrid", "model.classifier"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let mut opts = options(dir.path());
        opts.limits.min_vot_length = 300;
        assert!(matches!(
            validate_inputs(&opts),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_retain_workdir() {
        let mut opts = options(Path::new("/tmp"));
        assert!(!opts.retain_workdir());
        opts.log_level = LogLevel::Debug;
        assert!(opts.retain_workdir());
        opts.log_level = LogLevel::Warning;
        opts.keep_workdir = true;
        assert!(opts.retain_workdir());
        assert_eq!(opts.tiers.vot_mark, MarkFilter::Any);
    }
}
