//! WAV header probing using hound.

use crate::error::{Error, Result};
use std::path::Path;

/// Header facts about a recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordingInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read the WAV header of `path` without decoding samples.
///
/// The front end only accepts WAV input, so anything hound cannot open is
/// rejected before the pipeline starts.
pub fn read_recording_info(path: &Path) -> Result<RecordingInfo> {
    let reader = hound::WavReader::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    let spec = reader.spec();
    // duration() counts frames, i.e. samples per channel.
    let frames = reader.duration();

    Ok(RecordingInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        duration_secs: f64::from(frames) / f64::from(spec.sample_rate),
    })
}
