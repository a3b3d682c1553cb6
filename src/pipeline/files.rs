//! Intermediate file formats shared with the external tools.
//!
//! - window description (`.input`): `"wav" win_start win_end vot_start vot_end mark`
//! - path lists (`.tg_list`, `.wav_list`, `.feature_filelist`): one path per line
//! - predictions (`.preds`): `confidence onset_ms offset_ms`

use crate::annotation::WindowedVot;
use crate::constants::{EMPTY_MARK_PLACEHOLDER, TIME_DECIMALS};
use crate::error::{Error, Result};
use crate::stitch::{AnalysisWindow, Prediction};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write a list file with one path per line.
pub fn write_path_list<P: AsRef<Path>>(path: &Path, entries: &[P]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in entries {
        writeln!(writer, "{}", entry.as_ref().display())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the window description file consumed by the front end.
///
/// The recording path is quoted so it stays one column when it has spaces.
pub fn write_window_file(path: &Path, recording: &Path, windows: &[WindowedVot]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in windows {
        writeln!(
            writer,
            "\"{}\" {:.prec$} {:.prec$} {:.prec$} {:.prec$} {}",
            recording.display(),
            item.window.start_time,
            item.window.end_time,
            item.vot.start,
            item.vot.end,
            field_safe_mark(&item.vot.mark),
            prec = TIME_DECIMALS,
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Marks are written as a single whitespace-free field.
fn field_safe_mark(mark: &str) -> String {
    let joined = mark.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        EMPTY_MARK_PLACEHOLDER.to_string()
    } else {
        joined
    }
}

/// Read back the windows (columns 2 and 3) of a window description file.
pub fn read_window_file(path: &Path) -> Result<Vec<AnalysisWindow>> {
    let reader = BufReader::new(File::open(path)?);
    let mut windows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = index + 1;
        let fail = |message: String| Error::WindowFormat {
            path: path.to_path_buf(),
            line: line_num,
            message,
        };

        if line.trim().is_empty() {
            continue;
        }

        let Some(columns) = columns_after_path(&line) else {
            return Err(fail("unterminated quoted path".to_string()));
        };
        let [start, end, ..] = columns.as_slice() else {
            return Err(fail(format!(
                "expected at least 3 fields, found {}",
                columns.len() + 1
            )));
        };

        let start = parse_finite(start).map_err(|m| fail(format!("window start: {m}")))?;
        let end = parse_finite(end).map_err(|m| fail(format!("window end: {m}")))?;
        windows.push(AnalysisWindow::new(start, end));
    }

    Ok(windows)
}

/// Fields following the recording path, which may be double-quoted.
fn columns_after_path(line: &str) -> Option<Vec<&str>> {
    let line = line.trim_start();
    let rest = match line.strip_prefix('"') {
        Some(quoted) => &quoted[quoted.find('"')? + 1..],
        None => line.split_once(char::is_whitespace).map_or("", |(_, rest)| rest),
    };
    Some(rest.split_whitespace().collect())
}

/// Read the decoder's predictions file, one prediction per window in order.
///
/// Blank lines are skipped.
pub fn read_predictions(path: &Path) -> Result<Vec<Prediction>> {
    let reader = BufReader::new(File::open(path)?);
    let mut predictions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = index + 1;
        let fail = |message: String| Error::PredictionFormat {
            path: path.to_path_buf(),
            line: line_num,
            message,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => {}
            [confidence, onset, offset] => {
                let onset_ms = parse_finite(onset).map_err(|m| fail(format!("onset: {m}")))?;
                let offset_ms = parse_finite(offset).map_err(|m| fail(format!("offset: {m}")))?;
                predictions.push(Prediction::new(*confidence, onset_ms, offset_ms));
            }
            other => {
                return Err(fail(format!("expected 3 fields, found {}", other.len())));
            }
        }
    }

    Ok(predictions)
}

fn parse_finite(field: &str) -> std::result::Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("'{field}' is not a valid number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{field}' is not finite"))
    }
}
