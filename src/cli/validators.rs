//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use crate::cli::LogLevel;

/// Largest window offset accepted, in milliseconds.
const MAX_WINDOW_OFFSET_MS: f64 = 10_000.0;

/// Parse a logging level name, case-insensitively.
pub fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

/// Parse and validate a bounded float value.
///
/// # Arguments
///
/// * `s` - The string to parse
/// * `min` - Minimum allowed value (inclusive)
/// * `max` - Maximum allowed value (inclusive)
/// * `name` - Name of the parameter for error messages
pub fn parse_bounded_float(s: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{name} must be between {min} and {max}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse a window offset in milliseconds.
pub fn parse_milliseconds(s: &str) -> Result<f64, String> {
    parse_bounded_float(
        s,
        -MAX_WINDOW_OFFSET_MS,
        MAX_WINDOW_OFFSET_MS,
        "window offset (ms)",
    )
}
