//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Write a Praat long-format TextGrid with interval tiers.
pub fn write_textgrid(
    path: &Path,
    xmin: f64,
    xmax: f64,
    tiers: &[(&str, &[(f64, f64, &str)])],
) -> PathBuf {
    write_textgrid_with_points(path, xmin, xmax, tiers, None)
}

/// Like [`write_textgrid`], with an optional point tier (`TextTier`) last.
pub fn write_textgrid_with_points(
    path: &Path,
    xmin: f64,
    xmax: f64,
    tiers: &[(&str, &[(f64, f64, &str)])],
    points: Option<(&str, &[(f64, &str)])>,
) -> PathBuf {
    let mut out = String::new();
    let _ = writeln!(out, "File type = \"ooTextFile\"");
    let _ = writeln!(out, "Object class = \"TextGrid\"");
    let _ = writeln!(out);
    let _ = writeln!(out, "xmin = {xmin} ");
    let _ = writeln!(out, "xmax = {xmax} ");
    let _ = writeln!(out, "tiers? <exists> ");
    let _ = writeln!(out, "size = {} ", tiers.len() + usize::from(points.is_some()));
    let _ = writeln!(out, "item []: ");
    for (i, (name, intervals)) in tiers.iter().enumerate() {
        let _ = writeln!(out, "    item [{}]:", i + 1);
        let _ = writeln!(out, "        class = \"IntervalTier\" ");
        let _ = writeln!(out, "        name = \"{name}\" ");
        let _ = writeln!(out, "        xmin = {xmin} ");
        let _ = writeln!(out, "        xmax = {xmax} ");
        let _ = writeln!(out, "        intervals: size = {} ", intervals.len());
        for (j, (start, end, text)) in intervals.iter().enumerate() {
            let _ = writeln!(out, "        intervals [{}]:", j + 1);
            let _ = writeln!(out, "            xmin = {start} ");
            let _ = writeln!(out, "            xmax = {end} ");
            let _ = writeln!(out, "            text = \"{text}\" ");
        }
    }
    if let Some((name, marks)) = points {
        let _ = writeln!(out, "    item [{}]:", tiers.len() + 1);
        let _ = writeln!(out, "        class = \"TextTier\" ");
        let _ = writeln!(out, "        name = \"{name}\" ");
        let _ = writeln!(out, "        xmin = {xmin} ");
        let _ = writeln!(out, "        xmax = {xmax} ");
        let _ = writeln!(out, "        points: size = {} ", marks.len());
        for (j, (time, mark)) in marks.iter().enumerate() {
            let _ = writeln!(out, "        points [{}]:", j + 1);
            let _ = writeln!(out, "            number = {time} ");
            let _ = writeln!(out, "            mark = \"{mark}\" ");
        }
    }
    std::fs::write(path, out).unwrap();
    path.to_path_buf()
}

/// Write a silent mono 16 kHz WAV of the given length.
pub fn write_wav(path: &Path, seconds: u32) -> PathBuf {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..(16_000 * seconds) {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
    path.to_path_buf()
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut permissions = std::fs::metadata(path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).unwrap();
    path.to_path_buf()
}
