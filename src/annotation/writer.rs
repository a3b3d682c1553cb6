//! Output tier writing.

use crate::annotation::Annotation;
use crate::constants::AUTO_VOT_TIER;
use crate::error::{Error, Result};
use crate::stitch::{StitchedInterval, check_coverage};
use tracing::{debug, info, warn};

/// What to do when the output tier is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierPolicy {
    /// Add another tier after the existing one.
    #[default]
    Append,
    /// Drop the existing tier and write a fresh one.
    Replace,
    /// Refuse to touch the file.
    Refuse,
}

/// Make room for the output tier according to `policy`.
///
/// Called before any external tool runs so a refusal costs nothing.
pub fn prepare_output_tier(annotation: &mut Annotation, policy: TierPolicy) -> Result<()> {
    if !annotation.has_tier(AUTO_VOT_TIER) {
        return Ok(());
    }

    match policy {
        TierPolicy::Append => {
            info!("'{AUTO_VOT_TIER}' tier already present, appending another one");
            Ok(())
        }
        TierPolicy::Refuse => Err(Error::TierExists {
            name: AUTO_VOT_TIER.to_string(),
            path: annotation.path().to_path_buf(),
        }),
        TierPolicy::Replace => {
            let removed = annotation.remove_tier(AUTO_VOT_TIER);
            warn!("Replacing {removed} existing '{AUTO_VOT_TIER}' tier(s)");
            Ok(())
        }
    }
}

/// Append the stitched intervals as the `AutoVOT` tier and save the file.
///
/// Coverage of the grid bounds is checked first; on failure the file is not
/// written. Zero-width fillers are dropped, as TextGrid intervals must have
/// positive length; the remaining tier is still contiguous.
pub fn append_auto_vot_tier(annotation: &mut Annotation, intervals: &[StitchedInterval]) -> Result<()> {
    check_coverage(intervals, annotation.xmin(), annotation.xmax())?;

    let written: Vec<StitchedInterval> = intervals
        .iter()
        .filter(|i| i.duration() > 0.0)
        .cloned()
        .collect();
    if written.len() < intervals.len() {
        debug!(
            "Dropped {} zero-width filler interval(s)",
            intervals.len() - written.len()
        );
    }

    annotation.append_interval_tier(AUTO_VOT_TIER, &written)?;
    annotation.save()?;

    let vots = written.iter().filter(|i| !i.is_filler()).count();
    info!(
        "Wrote tier '{AUTO_VOT_TIER}' with {vots} VOT(s) to {}",
        annotation.path().display()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::annotation::test_support::{TierSpec, write_textgrid};
    use crate::stitch::{AnalysisWindow, Prediction, stitch_predictions};
    use tempfile::TempDir;

    const VOT_TIER: &[(f64, f64, &str)] = &[(0.0, 1.0, ""), (1.0, 1.1, "pos"), (1.1, 2.0, "")];

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(dir.path(), 0.0, 2.0, &[TierSpec::intervals("vot", VOT_TIER)]);
        let mut annotation = Annotation::read(&path).unwrap();

        let intervals = vec![
            StitchedInterval::filler(0.0, 1.04),
            StitchedInterval::new(1.04, 1.12, "0.92"),
            StitchedInterval::filler(1.12, 2.0),
        ];
        append_auto_vot_tier(&mut annotation, &intervals).unwrap();

        let reread = Annotation::read(&path).unwrap();
        assert_eq!(reread.tier_names(), vec!["vot", "AutoVOT"]);
        let tier = reread.interval_segments("AutoVOT").unwrap();
        assert_eq!(tier.len(), 3);
        assert_eq!(tier[1].mark, "0.92");
    }

    #[test]
    fn test_gapped_tier_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(dir.path(), 0.0, 2.0, &[TierSpec::intervals("vot", VOT_TIER)]);
        let before = std::fs::read(&path).unwrap();
        let mut annotation = Annotation::read(&path).unwrap();

        let intervals = vec![
            StitchedInterval::filler(0.0, 1.0),
            StitchedInterval::new(1.2, 2.0, "x"),
        ];
        let result = append_auto_vot_tier(&mut annotation, &intervals);

        assert!(matches!(result, Err(Error::CoverageViolation { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_zero_width_fillers_are_dropped_on_write() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(dir.path(), 0.0, 2.0, &[TierSpec::intervals("vot", VOT_TIER)]);
        let mut annotation = Annotation::read(&path).unwrap();

        // Back-to-back VOTs, and a first VOT starting at the grid start.
        let windows = [AnalysisWindow::new(0.0, 1.1), AnalysisWindow::new(1.1, 1.3)];
        let predictions = [
            Prediction::new("a", 0.0, 1100.0),
            Prediction::new("b", 0.0, 50.0),
        ];
        let intervals = stitch_predictions(&windows, &predictions, 0.0, 2.0).unwrap();
        assert_eq!(intervals.len(), 5);

        append_auto_vot_tier(&mut annotation, &intervals).unwrap();

        let tier = Annotation::read(&path)
            .unwrap()
            .interval_segments("AutoVOT")
            .unwrap();
        let marks: Vec<&str> = tier.iter().map(|s| s.mark.as_str()).collect();
        assert_eq!(marks, vec!["a", "b", ""]);
        assert!((tier[1].start - 1.1).abs() < 1e-9);
        assert!((tier[2].end - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_existing_tier_appended_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(
            dir.path(),
            0.0,
            2.0,
            &[
                TierSpec::intervals("vot", VOT_TIER),
                TierSpec::intervals("AutoVOT", &[(0.0, 2.0, "")]),
            ],
        );
        let mut annotation = Annotation::read(&path).unwrap();

        prepare_output_tier(&mut annotation, TierPolicy::default()).unwrap();
        append_auto_vot_tier(
            &mut annotation,
            &[
                StitchedInterval::filler(0.0, 1.0),
                StitchedInterval::new(1.0, 1.1, "0.5"),
                StitchedInterval::filler(1.1, 2.0),
            ],
        )
        .unwrap();

        let reread = Annotation::read(&path).unwrap();
        assert_eq!(reread.tier_names(), vec!["vot", "AutoVOT", "AutoVOT"]);
    }

    #[test]
    fn test_existing_tier_refused() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(
            dir.path(),
            0.0,
            2.0,
            &[
                TierSpec::intervals("vot", VOT_TIER),
                TierSpec::intervals("AutoVOT", &[(0.0, 2.0, "")]),
            ],
        );
        let mut annotation = Annotation::read(&path).unwrap();

        let result = prepare_output_tier(&mut annotation, TierPolicy::Refuse);
        assert!(matches!(result, Err(Error::TierExists { .. })));
    }

    #[test]
    fn test_existing_tier_replaced() {
        let dir = TempDir::new().unwrap();
        let path = write_textgrid(
            dir.path(),
            0.0,
            2.0,
            &[
                TierSpec::intervals("vot", VOT_TIER),
                TierSpec::intervals("AutoVOT", &[(0.0, 2.0, "")]),
            ],
        );
        let mut annotation = Annotation::read(&path).unwrap();

        prepare_output_tier(&mut annotation, TierPolicy::Replace).unwrap();
        assert!(!annotation.has_tier("AutoVOT"));
        assert_eq!(annotation.tier_names(), vec!["vot"]);
    }
}
