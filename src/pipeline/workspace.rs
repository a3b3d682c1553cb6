//! Per-run scratch directory and intermediate file layout.

use crate::constants::workspace::{
    DIR_PREFIX, FALLBACK_BASENAME, FEATURE_FILE_EXT, FEATURE_LIST_EXT, FEATURES_DIR, INPUT_EXT,
    LABELS_EXT, PREDS_EXT, TEXTGRID_LIST_EXT, WAV_LIST_EXT,
};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Scratch directory isolating one run's intermediate files.
///
/// Unless retained, the directory is removed when the workspace is dropped,
/// on success and error paths alike. Removal failures are ignored.
#[derive(Debug)]
pub struct Workspace {
    /// Owning handle; `None` once the directory has been kept.
    dir: Option<TempDir>,
    root: PathBuf,
    basename: String,
}

impl Workspace {
    /// Create a fresh, uniquely named workspace in the system temp directory.
    pub fn create(recording: &Path, retain: bool) -> Result<Self> {
        Self::create_in(&std::env::temp_dir(), recording, retain)
    }

    /// Create a fresh workspace under `parent`.
    pub fn create_in(parent: &Path, recording: &Path, retain: bool) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(DIR_PREFIX).tempdir_in(parent)?;
        std::fs::create_dir(dir.path().join(FEATURES_DIR))?;

        let basename = recording.file_stem().map_or_else(
            || FALLBACK_BASENAME.to_string(),
            |s| s.to_string_lossy().into_owned(),
        );

        let (dir, root) = if retain {
            let root = dir.keep();
            (None, root)
        } else {
            let root = dir.path().to_path_buf();
            (Some(dir), root)
        };

        debug!("working_dir={}", root.display());

        Ok(Self {
            dir,
            root,
            basename,
        })
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the directory outlives this handle.
    pub fn is_retained(&self) -> bool {
        self.dir.is_none()
    }

    /// Directory receiving per-window feature files.
    pub fn features_dir(&self) -> PathBuf {
        self.root.join(FEATURES_DIR)
    }

    /// Feature file the front end writes for each of `count` windows.
    pub fn feature_files(&self, count: usize) -> Vec<PathBuf> {
        let dir = self.features_dir();
        (0..count)
            .map(|index| dir.join(format!("{}_{index}.{FEATURE_FILE_EXT}", self.basename)))
            .collect()
    }

    fn file(&self, extension: &str) -> PathBuf {
        self.root.join(format!("{}.{extension}", self.basename))
    }

    /// Window description file.
    pub fn input_file(&self) -> PathBuf {
        self.file(INPUT_EXT)
    }

    /// Feature file list, one entry per window, prepared for the front end.
    pub fn feature_list_file(&self) -> PathBuf {
        self.file(FEATURE_LIST_EXT)
    }

    /// Labels file produced by the front end.
    pub fn labels_file(&self) -> PathBuf {
        self.file(LABELS_EXT)
    }

    /// Predictions file produced by the decoder.
    pub fn preds_file(&self) -> PathBuf {
        self.file(PREDS_EXT)
    }

    /// List of TextGrid files.
    pub fn textgrid_list_file(&self) -> PathBuf {
        self.file(TEXTGRID_LIST_EXT)
    }

    /// List of recordings.
    pub fn wav_list_file(&self) -> PathBuf {
        self.file(WAV_LIST_EXT)
    }
}
