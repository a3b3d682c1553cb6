//! Recording inspection.

mod header;

pub use header::{RecordingInfo, read_recording_info};
