//! Analysis window extraction.

use crate::annotation::{Annotation, LabeledSegment, TierDefinitions, WindowSource};
use crate::error::{Error, Result};
use crate::stitch::AnalysisWindow;
use tracing::{debug, warn};

/// A labeled VOT together with the window it is searched in.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedVot {
    /// Search window.
    pub window: AnalysisWindow,
    /// Labeled VOT interval the window was derived from.
    pub vot: LabeledSegment,
}

/// Extract one search window per selected VOT interval, ordered by time.
///
/// VOTs without an enclosing window interval, or whose window is empty after
/// clamping to the grid bounds, are skipped with a warning. A window that
/// runs into the next one is cut at the next window's start, so the result
/// never overlaps.
///
/// # Errors
///
/// Fails if a tier is missing or not an interval tier, or if nothing is
/// selected.
pub fn extract_windows(annotation: &Annotation, defs: &TierDefinitions) -> Result<Vec<WindowedVot>> {
    let vots: Vec<LabeledSegment> = annotation
        .interval_segments(&defs.vot_tier)?
        .into_iter()
        .filter(|segment| defs.vot_mark.matches(&segment.mark))
        .collect();

    debug!(
        "Selected {} interval(s) from tier '{}' with mark '{}'",
        vots.len(),
        defs.vot_tier,
        defs.vot_mark
    );

    let window_segments = match &defs.window {
        WindowSource::Tier { name, mark } => Some(
            annotation
                .interval_segments(name)?
                .into_iter()
                .filter(|segment| mark.matches(&segment.mark))
                .collect::<Vec<_>>(),
        ),
        WindowSource::Constant { .. } => None,
    };

    let (grid_min, grid_max) = (annotation.xmin(), annotation.xmax());
    let mut windowed = Vec::with_capacity(vots.len());

    for vot in vots {
        let raw = match (&defs.window, window_segments.as_deref()) {
            (WindowSource::Constant { min_offset, max_offset }, _) => {
                Some((vot.end + min_offset, vot.end + max_offset))
            }
            (WindowSource::Tier { .. }, Some(segments)) => {
                enclosing(segments, vot.midpoint()).map(|w| (w.start, w.end))
            }
            (WindowSource::Tier { .. }, None) => None,
        };

        let Some((start, end)) = raw else {
            warn!(
                "No window interval encloses VOT [{:.3}, {:.3}] '{}', skipping",
                vot.start,
                vot.end,
                vot.mark.trim()
            );
            continue;
        };

        let start = start.max(grid_min);
        let end = end.min(grid_max);
        if start >= end {
            warn!(
                "Window for VOT [{:.3}, {:.3}] is empty inside the TextGrid bounds, skipping",
                vot.start, vot.end
            );
            continue;
        }

        windowed.push(WindowedVot {
            window: AnalysisWindow::new(start, end),
            vot,
        });
    }

    windowed.sort_by(|a, b| a.window.start_time.total_cmp(&b.window.start_time));
    let windowed = trim_overlaps(windowed);

    if windowed.is_empty() {
        return Err(Error::NoWindows {
            tier: defs.vot_tier.clone(),
            mark: defs.vot_mark.to_string(),
        });
    }

    Ok(windowed)
}

fn enclosing(segments: &[LabeledSegment], at: f64) -> Option<&LabeledSegment> {
    segments.iter().find(|s| s.start <= at && at <= s.end)
}

/// Cut each window at the start of the next one. Input is sorted by start.
fn trim_overlaps(windowed: Vec<WindowedVot>) -> Vec<WindowedVot> {
    let next_starts: Vec<Option<f64>> = windowed
        .iter()
        .skip(1)
        .map(|w| Some(w.window.start_time))
        .chain(std::iter::once(None))
        .collect();

    let mut kept = Vec::with_capacity(windowed.len());
    for (mut item, next_start) in windowed.into_iter().zip(next_starts) {
        if let Some(next_start) = next_start {
            if item.window.end_time > next_start {
                debug!(
                    "Trimming window [{:.3}, {:.3}] to end at {:.3}",
                    item.window.start_time, item.window.end_time, next_start
                );
                item.window.end_time = next_start;
            }
        }

        if item.window.start_time >= item.window.end_time {
            warn!(
                "Window for VOT [{:.3}, {:.3}] starts where the next one does, skipping",
                item.vot.start, item.vot.end
            );
            continue;
        }
        kept.push(item);
    }
    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotation::test_support::{TierSpec, write_textgrid};
    use tempfile::TempDir;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn load(dir: &TempDir, tiers: &[TierSpec<'_>]) -> Annotation {
        let path = write_textgrid(dir.path(), 0.0, 10.0, tiers);
        Annotation::read(&path).unwrap()
    }

    #[test]
    fn test_constant_window_around_vot_right_edge() {
        let dir = TempDir::new().unwrap();
        let annotation = load(
            &dir,
            &[TierSpec::intervals(
                "vot",
                &[(0.0, 1.0, ""), (1.0, 1.1, "pos"), (1.1, 10.0, "")],
            )],
        );
        let defs = TierDefinitions::new("vot", "*", None, "", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        assert_eq!(windows.len(), 1);
        assert_close(windows[0].window.start_time, 1.05);
        assert_close(windows[0].window.end_time, 1.9);
        assert_eq!(windows[0].vot.mark, "pos");
    }

    #[test]
    fn test_constant_window_clamped_to_grid() {
        let dir = TempDir::new().unwrap();
        let annotation = load(
            &dir,
            &[TierSpec::intervals(
                "vot",
                &[(0.0, 0.02, "x"), (0.02, 9.5, ""), (9.5, 9.6, "y"), (9.6, 10.0, "")],
            )],
        );
        let defs = TierDefinitions::new("vot", "*", None, "", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        assert_eq!(windows.len(), 2);
        assert_close(windows[0].window.start_time, 0.0);
        assert_close(windows[1].window.end_time, 10.0);
    }

    #[test]
    fn test_literal_mark_filter() {
        let dir = TempDir::new().unwrap();
        let annotation = load(
            &dir,
            &[TierSpec::intervals(
                "vot",
                &[(0.0, 1.0, "neg"), (1.0, 1.1, ""), (1.1, 3.0, "pos"), (3.0, 10.0, "")],
            )],
        );
        let defs = TierDefinitions::new("vot", "pos", None, "", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].vot.mark, "pos");
    }

    #[test]
    fn test_window_tier_encloses_vot() {
        let dir = TempDir::new().unwrap();
        let annotation = load(
            &dir,
            &[
                TierSpec::intervals(
                    "vot",
                    &[(0.0, 2.0, ""), (2.0, 2.05, "v"), (2.05, 6.0, ""), (6.0, 6.1, "v"), (6.1, 10.0, "")],
                ),
                TierSpec::intervals(
                    "window",
                    &[(0.0, 1.5, ""), (1.5, 2.5, "w"), (2.5, 10.0, "")],
                ),
            ],
        );
        let defs = TierDefinitions::new("vot", "*", Some("window"), "", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        // Second VOT has no marked window around it.
        assert_eq!(windows.len(), 1);
        assert_close(windows[0].window.start_time, 1.5);
        assert_close(windows[0].window.end_time, 2.5);
    }

    #[test]
    fn test_missing_tier_is_error() {
        let dir = TempDir::new().unwrap();
        let annotation = load(&dir, &[TierSpec::intervals("words", &[(0.0, 10.0, "")])]);
        let defs = TierDefinitions::new("vot", "*", None, "", -50.0, 800.0);

        let result = extract_windows(&annotation, &defs);
        assert!(matches!(result, Err(Error::TierNotFound { .. })));
    }

    #[test]
    fn test_no_marked_interval_is_error() {
        let dir = TempDir::new().unwrap();
        let annotation = load(&dir, &[TierSpec::intervals("vot", &[(0.0, 10.0, "")])]);
        let defs = TierDefinitions::new("vot", "*", None, "", -50.0, 800.0);

        let result = extract_windows(&annotation, &defs);
        assert!(matches!(result, Err(Error::NoWindows { .. })));
    }

    #[test]
    fn test_close_vots_get_trimmed_windows() {
        let dir = TempDir::new().unwrap();
        let annotation = load(
            &dir,
            &[TierSpec::intervals(
                "vot",
                &[(0.0, 1.0, ""), (1.0, 1.1, "a"), (1.1, 1.5, ""), (1.5, 1.6, "b"), (1.6, 10.0, "")],
            )],
        );
        let defs = TierDefinitions::new("vot", "*", None, "", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        assert_eq!(windows.len(), 2);
        assert_close(windows[0].window.start_time, 1.05);
        assert_close(windows[0].window.end_time, 1.55);
        assert_close(windows[1].window.start_time, 1.55);
        assert_close(windows[1].window.end_time, 2.4);
        assert_eq!(windows[0].vot.mark, "a");
    }

    #[test]
    fn test_window_sharing_a_start_is_dropped() {
        let dir = TempDir::new().unwrap();
        // Both VOTs lie inside the same marked window interval.
        let annotation = load(
            &dir,
            &[
                TierSpec::intervals(
                    "vot",
                    &[(0.0, 1.0, ""), (1.0, 1.1, "a"), (1.1, 1.5, ""), (1.5, 1.6, "b"), (1.6, 10.0, "")],
                ),
                TierSpec::intervals("window", &[(0.0, 0.8, ""), (0.8, 2.0, "w"), (2.0, 10.0, "")]),
            ],
        );
        let defs = TierDefinitions::new("vot", "*", Some("window"), "w", -50.0, 800.0);

        let windows = extract_windows(&annotation, &defs).unwrap();

        assert_eq!(windows.len(), 1);
        assert_close(windows[0].window.start_time, 0.8);
        assert_close(windows[0].window.end_time, 2.0);
    }
}
