//! Error types for autovot.

use crate::stitch::StitchError;

/// Result type alias for autovot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for autovot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither a recording nor an annotation file was given.
    #[error("both the recording and the TextGrid file must be given")]
    MissingInputs,

    /// An input file does not exist.
    #[error("{kind} file does not exist: {path}")]
    InputNotFound {
        /// What the file is (recording, TextGrid, model).
        kind: &'static str,
        /// Path to the missing file.
        path: std::path::PathBuf,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to open the recording.
    #[error("failed to open recording '{path}'")]
    AudioOpen {
        /// Path to the recording.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to read or write a TextGrid.
    #[error("TextGrid error for '{path}': {reason}")]
    TextGrid {
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A requested tier is missing from the TextGrid.
    #[error("tier '{name}' not found in '{path}'")]
    TierNotFound {
        /// Tier name.
        name: String,
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
    },

    /// A tier is a point tier where intervals are required.
    #[error("tier '{name}' is not an interval tier")]
    NotIntervalTier {
        /// Tier name.
        name: String,
    },

    /// The output tier already exists.
    #[error("tier '{name}' already exists in '{path}' (use --overwrite to replace it, or drop --refuse-existing to append)")]
    TierExists {
        /// Tier name.
        name: String,
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
    },

    /// No analysis window could be extracted.
    #[error("no analysis windows found in tier '{tier}' matching mark '{mark}'")]
    NoWindows {
        /// Tier searched.
        tier: String,
        /// Mark filter used.
        mark: String,
    },

    /// Malformed line in the predictions file.
    #[error("invalid predictions file '{path}' at line {line}: {message}")]
    PredictionFormat {
        /// Path to the predictions file.
        path: std::path::PathBuf,
        /// One-based line number.
        line: usize,
        /// Description of the format error.
        message: String,
    },

    /// Malformed line in the window description file.
    #[error("invalid window file '{path}' at line {line}: {message}")]
    WindowFormat {
        /// Path to the window file.
        path: std::path::PathBuf,
        /// One-based line number.
        line: usize,
        /// Description of the format error.
        message: String,
    },

    /// An external tool could not be started.
    #[error("failed to start '{program}'")]
    ToolSpawn {
        /// Program that was run.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited unsuccessfully.
    #[error("'{program}' failed: {status}")]
    ToolFailed {
        /// Program that was run.
        program: String,
        /// Exit status description.
        status: String,
    },

    /// Predictions could not be stitched into a tier.
    #[error(transparent)]
    Stitch(#[from] StitchError),

    /// A stitched tier does not cover its bounds contiguously.
    #[error("stitched tier is not contiguous: {message}")]
    CoverageViolation {
        /// Description of the violation.
        message: String,
    },
}
