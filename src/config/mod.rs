//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{init_config_file, load_config};
pub use paths::{config_file_path, resolve_config_path};
pub use types::{Config, DefaultsConfig, ToolsConfig};
pub use validate::validate_config;
