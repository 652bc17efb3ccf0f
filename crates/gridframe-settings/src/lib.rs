//! # GridFrame Settings
//!
//! Configuration loading, saving and validation. Files may be JSON or
//! TOML; the default location is the platform config directory.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, Config, GridSettings, LoggingSettings, StorageBackend, StorageSettings,
};
pub use error::{SettingsError, SettingsResult};
