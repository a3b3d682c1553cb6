//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "autovot";

/// Name of the tier appended to the annotation file.
pub const AUTO_VOT_TIER: &str = "AutoVOT";

/// Label prefix marking a negative VOT (voicing before release).
pub const NEGATIVE_VOT_PREFIX: &str = "neg ";

/// Tier and mark defaults.
pub mod tiers {
    /// Default name of the tier holding the VOTs to decode.
    pub const DEFAULT_VOT_TIER: &str = "vot";

    /// Default VOT mark filter.
    pub const DEFAULT_VOT_MARK: &str = "*";

    /// Mark filter matching any non-empty label.
    pub const ANY_MARK: &str = "*";
}

/// Search window defaults, in milliseconds relative to the VOT right edge.
pub mod window {
    /// Default window left boundary.
    pub const DEFAULT_MIN_MS: f64 = -50.0;

    /// Default window right boundary.
    pub const DEFAULT_MAX_MS: f64 = 800.0;
}

/// Accepted VOT duration bounds passed to the decoder, in milliseconds.
pub mod vot_length {
    /// Default minimum predicted VOT length.
    pub const DEFAULT_MIN_MS: u32 = 15;

    /// Default maximum predicted VOT length.
    pub const DEFAULT_MAX_MS: u32 = 250;
}

/// External tool defaults.
pub mod tools {
    /// Feature extraction front end executable.
    pub const DEFAULT_FRONT_END: &str = "VotFrontEnd2";

    /// VOT decoder executable.
    pub const DEFAULT_DECODER: &str = "InitialVotDecode";

    /// Maximum onset (ms) searched by the decoder.
    pub const DEFAULT_MAX_ONSET: u32 = 200;
}

/// Scratch workspace layout.
pub mod workspace {
    /// Prefix for the per-run temporary directory.
    pub const DIR_PREFIX: &str = "autovot-";

    /// Subdirectory receiving per-window feature files.
    pub const FEATURES_DIR: &str = "features";

    /// Fallback basename when the recording path has no usable stem.
    pub const FALLBACK_BASENAME: &str = "recording";

    /// Window description file extension.
    pub const INPUT_EXT: &str = "input";
    /// Feature file list extension.
    pub const FEATURE_LIST_EXT: &str = "feature_filelist";
    /// Per-window feature file extension.
    pub const FEATURE_FILE_EXT: &str = "txt";
    /// Labels file extension.
    pub const LABELS_EXT: &str = "labels";
    /// Predictions file extension.
    pub const PREDS_EXT: &str = "preds";
    /// TextGrid list file extension.
    pub const TEXTGRID_LIST_EXT: &str = "tg_list";
    /// WAV list file extension.
    pub const WAV_LIST_EXT: &str = "wav_list";
}

/// Number of decimals used for times in intermediate files.
pub const TIME_DECIMALS: usize = 6;

/// Placeholder written for an empty mark in the window description file.
pub const EMPTY_MARK_PLACEHOLDER: &str = "-";
