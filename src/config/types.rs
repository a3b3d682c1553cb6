//! Configuration type definitions.

use crate::constants::{tiers, tools, vot_length, window};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool settings.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Default decoding settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// External executables invoked by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Feature extraction front end (name on `PATH` or full path).
    pub front_end: String,

    /// VOT decoder (name on `PATH` or full path).
    pub decoder: String,

    /// Maximum onset in milliseconds searched by the decoder.
    pub max_onset: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            front_end: tools::DEFAULT_FRONT_END.to_string(),
            decoder: tools::DEFAULT_DECODER.to_string(),
            max_onset: tools::DEFAULT_MAX_ONSET,
        }
    }
}

/// Default tier and decoding settings, overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Tier holding the VOTs to decode.
    pub vot_tier: String,

    /// Mark filter for the VOT tier.
    pub vot_mark: String,

    /// Window left boundary in ms relative to the VOT right edge.
    pub window_min_ms: f64,

    /// Window right boundary in ms relative to the VOT right edge.
    pub window_max_ms: f64,

    /// Minimum predicted VOT length in ms.
    pub min_vot_length_ms: u32,

    /// Maximum predicted VOT length in ms.
    pub max_vot_length_ms: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            vot_tier: tiers::DEFAULT_VOT_TIER.to_string(),
            vot_mark: tiers::DEFAULT_VOT_MARK.to_string(),
            window_min_ms: window::DEFAULT_MIN_MS,
            window_max_ms: window::DEFAULT_MAX_MS,
            min_vot_length_ms: vot_length::DEFAULT_MIN_MS,
            max_vot_length_ms: vot_length::DEFAULT_MAX_MS,
        }
    }
}
