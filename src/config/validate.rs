//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_tools(config)?;
    validate_defaults(config)?;
    Ok(())
}

fn validate_tools(config: &Config) -> Result<()> {
    let tools = &config.tools;

    if tools.front_end.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "tools.front_end must not be empty".to_string(),
        });
    }

    if tools.decoder.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "tools.decoder must not be empty".to_string(),
        });
    }

    if tools.max_onset == 0 {
        return Err(Error::ConfigValidation {
            message: "tools.max_onset must be at least 1".to_string(),
        });
    }

    Ok(())
}

fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if defaults.vot_tier.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "defaults.vot_tier must not be empty".to_string(),
        });
    }

    if defaults.window_min_ms >= defaults.window_max_ms {
        return Err(Error::ConfigValidation {
            message: format!(
                "window_min_ms ({}) must be less than window_max_ms ({})",
                defaults.window_min_ms, defaults.window_max_ms
            ),
        });
    }

    if defaults.min_vot_length_ms == 0 {
        return Err(Error::ConfigValidation {
            message: "min_vot_length_ms must be at least 1".to_string(),
        });
    }

    if defaults.min_vot_length_ms >= defaults.max_vot_length_ms {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_vot_length_ms ({}) must be less than max_vot_length_ms ({})",
                defaults.min_vot_length_ms, defaults.max_vot_length_ms
            ),
        });
    }

    Ok(())
}
