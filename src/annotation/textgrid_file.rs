//! TextGrid access through the `textgrid` crate.
//!
//! Files are passed through `normalize_text` before parsing, since the
//! crate expects its own writer's layout rather than what Praat saves.

use crate::error::{Error, Result};
use crate::stitch::StitchedInterval;
use std::io::Write;
use std::path::{Path, PathBuf};
use textgrid::{Interval, TextGrid, Tier, TierType};

const TEXTGRID_SUFFIX: &str = ".TextGrid";

/// One labeled interval read from a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSegment {
    /// Interval start in seconds.
    pub start: f64,
    /// Interval end in seconds.
    pub end: f64,
    /// Interval mark, untrimmed.
    pub mark: String,
}

impl LabeledSegment {
    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A TextGrid loaded from disk, remembered with its path.
pub struct Annotation {
    path: PathBuf,
    grid: TextGrid,
}

impl Annotation {
    /// Read a TextGrid file in Praat's long or short text format.
    pub fn read(path: &Path) -> Result<Self> {
        let fail = |reason: String| Error::TextGrid {
            path: path.to_path_buf(),
            reason,
        };

        let text = normalize_text(&std::fs::read(path)?).map_err(fail)?;

        let mut staged = tempfile::Builder::new().suffix(TEXTGRID_SUFFIX).tempfile()?;
        staged.write_all(text.as_bytes())?;
        staged.flush()?;

        let grid = TextGrid::from_file(staged.path()).map_err(|e| fail(e.to_string()))?;
        Ok(Self {
            path: path.to_path_buf(),
            grid,
        })
    }

    /// Path the TextGrid was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Global start time.
    pub fn xmin(&self) -> f64 {
        self.grid.xmin
    }

    /// Global end time.
    pub fn xmax(&self) -> f64 {
        self.grid.xmax
    }

    /// Names of all tiers, in file order.
    pub fn tier_names(&self) -> Vec<&str> {
        self.grid.tiers.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether a tier with this name exists.
    pub fn has_tier(&self, name: &str) -> bool {
        self.grid.tiers.iter().any(|t| t.name == name)
    }

    /// Intervals of an interval tier, sorted by start time.
    pub fn interval_segments(&self, name: &str) -> Result<Vec<LabeledSegment>> {
        let tier = self
            .grid
            .tiers
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::TierNotFound {
                name: name.to_string(),
                path: self.path.clone(),
            })?;

        if !matches!(tier.tier_type, TierType::IntervalTier) {
            return Err(Error::NotIntervalTier {
                name: name.to_string(),
            });
        }

        let mut segments: Vec<LabeledSegment> = tier
            .intervals
            .iter()
            .map(|interval| LabeledSegment {
                start: interval.xmin,
                end: interval.xmax,
                mark: interval.text.clone(),
            })
            .collect();
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        Ok(segments)
    }

    /// Remove every tier with this name. Returns how many were removed.
    pub fn remove_tier(&mut self, name: &str) -> usize {
        let before = self.grid.tiers.len();
        self.grid.tiers.retain(|t| t.name != name);
        before - self.grid.tiers.len()
    }

    /// Append an interval tier spanning the whole grid.
    pub fn append_interval_tier(&mut self, name: &str, intervals: &[StitchedInterval]) -> Result<()> {
        let tier = Tier {
            name: name.to_string(),
            tier_type: TierType::IntervalTier,
            xmin: self.grid.xmin,
            xmax: self.grid.xmax,
            intervals: intervals
                .iter()
                .map(|interval| Interval {
                    xmin: interval.start,
                    xmax: interval.end,
                    text: interval.label.clone(),
                })
                .collect(),
            points: Vec::new(),
        };

        self.grid.add_tier(tier).map_err(|e| Error::TextGrid {
            path: self.path.clone(),
            reason: format!("failed to add tier '{name}': {e}"),
        })
    }

    /// Write the grid back to the path it was read from, in long text format.
    ///
    /// The file is replaced in one rename, so a failed write leaves the
    /// original intact.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = tempfile::Builder::new()
            .prefix(".autovot-")
            .suffix(TEXTGRID_SUFFIX)
            .tempfile_in(dir)?;

        self.grid
            .to_file(staged.path(), false)
            .map_err(|e| Error::TextGrid {
                path: self.path.clone(),
                reason: format!("failed to write: {e}"),
            })?;

        if let Ok(metadata) = std::fs::metadata(&self.path) {
            std::fs::set_permissions(staged.path(), metadata.permissions())?;
        }
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Rewrite Praat output into the line layout `textgrid` 0.1 parses.
///
/// - UTF-16 (Praat's choice for non-ASCII labels) and UTF-8 BOMs are decoded
/// - trailing whitespace and CRLF endings are stripped, blank lines dropped
/// - the short-format header and its `<exists>` flag are reduced to the bare form
/// - point times written as `number = ` become `time = `
/// - a point count line is doubled: the parser reads the point count from the
///   line after the one it tried as an interval count
fn normalize_text(bytes: &[u8]) -> std::result::Result<String, String> {
    let decoded = decode_text(bytes)?;
    let mut out = String::with_capacity(decoded.len() + 64);

    for (index, line) in decoded.lines().map(str::trim_end).enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed == "<exists>" {
            continue;
        }
        if index == 0 && trimmed.starts_with("File type = \"ooTextFile") {
            out.push_str("File type = \"ooTextFile\"\n");
            continue;
        }

        if let Some(time) = trimmed.strip_prefix("number = ") {
            let indent = &line[..line.len() - trimmed.len()];
            out.push_str(indent);
            out.push_str("time = ");
            out.push_str(time);
            out.push('\n');
            continue;
        }

        out.push_str(line);
        out.push('\n');
        if trimmed.starts_with("points: size = ") {
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok(out)
}

fn decode_text(bytes: &[u8]) -> std::result::Result<String, String> {
    let utf16 = |big_endian: bool, body: &[u8]| {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| {
                if big_endian {
                    u16::from_be_bytes([pair[0], pair[1]])
                } else {
                    u16::from_le_bytes([pair[0], pair[1]])
                }
            })
            .collect();
        String::from_utf16(&units).map_err(|_| "invalid UTF-16 text".to_string())
    };

    match bytes {
        [0xFE, 0xFF, body @ ..] => utf16(true, body),
        [0xFF, 0xFE, body @ ..] => utf16(false, body),
        [0xEF, 0xBB, 0xBF, body @ ..] => {
            String::from_utf8(body.to_vec()).map_err(|_| "invalid UTF-8 text".to_string())
        }
        _ => String::from_utf8(bytes.to_vec()).map_err(|_| "invalid UTF-8 text".to_string()),
    }
}
