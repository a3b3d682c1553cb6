//! Annotation file handling: tier rules, window extraction and tier output.

mod textgrid_file;
mod tiers;
mod windows;
mod writer;

pub use textgrid_file::{Annotation, LabeledSegment};
pub use tiers::{MarkFilter, TierDefinitions, WindowSource};
pub use windows::{WindowedVot, extract_windows};
pub use writer::{TierPolicy, append_auto_vot_tier, prepare_output_tier};
