//! Configuration file loading.

use crate::config::{Config, config_file_path};
use crate::error::{Error, Result};
use std::path::Path;

/// Load the configuration used for a run.
///
/// An explicit path (from `--config` or `AUTOVOT_CONFIG`) must exist. The
/// platform default is optional: when it is absent, or no config directory
/// can be determined, built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    match config_file_path() {
        Ok(path) if path.is_file() => read_config(&path),
        _ => Ok(Config::default()),
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the built-in defaults to `path` unless a file is already there.
///
/// Returns `false` when an existing file was left alone.
pub fn init_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let write_err = |e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let contents = toml::to_string_pretty(&Config::default())
        .map_err(|e| Error::ConfigSerialize { source: e })?;
    std::fs::write(path, contents).map_err(write_err)?;
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[tools]
front_end = "/opt/autovot/bin/VotFrontEnd2"
max_onset = 150

[defaults]
vot_tier = "stops"
window_min_ms = -30.0
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.tools.front_end, "/opt/autovot/bin/VotFrontEnd2");
        assert_eq!(config.tools.decoder, "InitialVotDecode");
        assert_eq!(config.tools.max_onset, 150);
        assert_eq!(config.defaults.vot_tier, "stops");
        assert_eq!(config.defaults.window_min_ms, -30.0);
        assert_eq!(config.defaults.window_max_ms, 800.0);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = load_config(Some(Path::new("/nonexistent/autovot.toml")));
        assert!(matches!(result, Err(Error::ConfigRead { .. })));
    }

    #[test]
    fn test_init_writes_loadable_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(init_config_file(&path).unwrap());
        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.vot_mark, "*");
        assert_eq!(loaded.tools.max_onset, 200);

        std::fs::write(&path, "[defaults]\nvot_tier = \"mine\"\n").unwrap();
        assert!(!init_config_file(&path).unwrap());
        assert_eq!(load_config(Some(&path)).unwrap().defaults.vot_tier, "mine");
    }
}
