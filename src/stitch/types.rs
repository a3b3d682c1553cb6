//! Stitcher input and output records.

use crate::constants::NEGATIVE_VOT_PREFIX;

/// A search window for one annotated unit, in absolute seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisWindow {
    /// Window start in seconds.
    pub start_time: f64,
    /// Window end in seconds.
    pub end_time: f64,
}

impl AnalysisWindow {
    /// Create a window from its bounds.
    pub const fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// One decoder output line.
///
/// Onset and offset are in milliseconds from the start of the matching
/// [`AnalysisWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Confidence as printed by the decoder, kept verbatim for the label.
    pub confidence: String,
    /// Predicted onset in milliseconds.
    pub onset_ms: f64,
    /// Predicted offset in milliseconds.
    pub offset_ms: f64,
}

impl Prediction {
    /// Create a prediction.
    pub fn new(confidence: impl Into<String>, onset_ms: f64, offset_ms: f64) -> Self {
        Self {
            confidence: confidence.into(),
            onset_ms,
            offset_ms,
        }
    }

    /// Whether voicing starts before the release (offset not after onset).
    pub fn is_negative(&self) -> bool {
        self.onset_ms >= self.offset_ms
    }

    /// Tier label for this prediction.
    pub fn label(&self) -> String {
        if self.is_negative() {
            format!("{NEGATIVE_VOT_PREFIX}{}", self.confidence)
        } else {
            self.confidence.clone()
        }
    }

    /// Absolute `(onset, offset)` in seconds with polarity corrected.
    pub fn absolute_bounds(&self, window: &AnalysisWindow) -> (f64, f64) {
        let early = self.onset_ms.min(self.offset_ms);
        let late = self.onset_ms.max(self.offset_ms);
        (
            window.start_time + early / 1000.0,
            window.start_time + late / 1000.0,
        )
    }
}

/// One interval of the output tier, in absolute seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct StitchedInterval {
    /// Interval start in seconds.
    pub start: f64,
    /// Interval end in seconds.
    pub end: f64,
    /// Interval label; empty for fillers.
    pub label: String,
}

impl StitchedInterval {
    /// Create an interval.
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Create an unlabeled filler interval.
    pub fn filler(start: f64, end: f64) -> Self {
        Self::new(start, end, String::new())
    }

    /// Whether this is a filler between VOTs.
    pub fn is_filler(&self) -> bool {
        self.label.is_empty()
    }

    /// Interval duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
