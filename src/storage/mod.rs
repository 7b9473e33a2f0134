//! Settings persistence.

pub mod config;

pub use config::{default_config_path, load_settings, save_settings, ConfigStore};
