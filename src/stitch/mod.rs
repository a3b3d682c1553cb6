//! Interval stitching.
//!
//! Converts per-window decoder predictions into a gapless, labeled interval
//! sequence in the annotation file's time coordinates. Every VOT interval is
//! surrounded by unlabeled fillers, so `N` predictions always yield `2N + 1`
//! intervals spanning `[global_min, global_max]`.

mod types;

pub use types::{AnalysisWindow, Prediction, StitchedInterval};

use crate::error::{Error, Result};

/// Reasons predictions cannot be stitched into a tier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StitchError {
    /// Nothing to stitch.
    #[error("no predictions to stitch")]
    NoPredictions,

    /// Windows and predictions are not positionally aligned.
    #[error("{windows} analysis windows but {predictions} predictions")]
    CountMismatch {
        /// Number of windows.
        windows: usize,
        /// Number of predictions.
        predictions: usize,
    },

    /// A prediction maps to a zero-length (or non-finite) interval.
    #[error("prediction {index} yields a degenerate VOT at {at}s")]
    DegenerateVot {
        /// Zero-based prediction index.
        index: usize,
        /// Absolute onset of the degenerate interval.
        at: f64,
    },
}

/// Stitch predictions into a contiguous interval sequence.
///
/// `windows[i]` anchors `predictions[i]`. Windows must be ordered and
/// non-overlapping; that is the caller's responsibility. All inputs are
/// validated before anything is built, so an error never leaves partial
/// output behind.
///
/// Zero-width fillers (one VOT ending exactly where the next begins) are
/// kept here, so the result always has `2N + 1` intervals.
///
/// # Errors
///
/// Returns [`StitchError`] when there are no predictions, when the counts
/// differ, or when a prediction has `onset == offset`.
pub fn stitch_predictions(
    windows: &[AnalysisWindow],
    predictions: &[Prediction],
    global_min: f64,
    global_max: f64,
) -> std::result::Result<Vec<StitchedInterval>, StitchError> {
    if predictions.is_empty() {
        return Err(StitchError::NoPredictions);
    }
    if windows.len() != predictions.len() {
        return Err(StitchError::CountMismatch {
            windows: windows.len(),
            predictions: predictions.len(),
        });
    }

    let mut vots = Vec::with_capacity(predictions.len());
    for (index, (window, prediction)) in windows.iter().zip(predictions).enumerate() {
        let (onset, offset) = prediction.absolute_bounds(window);
        // False for NaN as well as for onset == offset.
        let ordered = onset < offset;
        if !ordered {
            return Err(StitchError::DegenerateVot { index, at: onset });
        }
        vots.push(StitchedInterval::new(onset, offset, prediction.label()));
    }

    let mut intervals = Vec::with_capacity(2 * vots.len() + 1);
    intervals.push(StitchedInterval::filler(global_min, vots[0].start));

    for (i, vot) in vots.iter().enumerate() {
        let next_start = vots.get(i + 1).map_or(global_max, |next| next.start);
        intervals.push(vot.clone());
        intervals.push(StitchedInterval::filler(vot.end, next_start));
    }

    Ok(intervals)
}

/// Check that `intervals` tile `[min, max]` without gaps or overlaps.
///
/// Zero-width intervals are accepted; negative durations are not.
/// Boundaries are compared exactly, as stitching copies them verbatim.
#[allow(clippy::float_cmp)]
pub fn check_coverage(intervals: &[StitchedInterval], min: f64, max: f64) -> Result<()> {
    let violation = |message: String| Err(Error::CoverageViolation { message });

    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return violation("tier has no intervals".to_string());
    };

    if first.start != min {
        return violation(format!("tier starts at {} instead of {min}", first.start));
    }
    if last.end != max {
        return violation(format!("tier ends at {} instead of {max}", last.end));
    }

    for (i, interval) in intervals.iter().enumerate() {
        if interval.end < interval.start {
            return violation(format!(
                "interval {i} [{}, {}] has negative duration",
                interval.start, interval.end
            ));
        }
    }

    for (i, pair) in intervals.windows(2).enumerate() {
        if pair[0].end != pair[1].start {
            return violation(format!(
                "gap between interval {i} ending at {} and interval {} starting at {}",
                pair[0].end,
                i + 1,
                pair[1].start
            ));
        }
    }

    Ok(())
}
