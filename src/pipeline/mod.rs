//! Decoding pipeline: scratch workspace, external tools and tier output.

mod decoder;
mod files;
mod tools;
mod workspace;

pub use decoder::{DecodeOptions, DecodeResult, decode, validate_inputs};
pub use files::{read_predictions, read_window_file, write_path_list, write_window_file};
pub use tools::{DecodeLimits, decoder_args, front_end_args, run_tool};
pub use workspace::Workspace;
