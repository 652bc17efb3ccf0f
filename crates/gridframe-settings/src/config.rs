//! Configuration file: storage backend, grid defaults and logging.
//!
//! Files are JSON or TOML, chosen by extension. Every section has
//! defaults, so a partial file is valid.

use crate::error::{SettingsError, SettingsResult};
use gridframe_core::constants::{
    DEFAULT_CELL_SIZE_MM, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH_MM, MAX_PROJECTS,
};
use gridframe_core::StrokeColor;
use gridframe_designer::{EditDefaults, LabelStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "gridframe";

/// Where project records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per record under `data_dir`
    #[default]
    File,
    /// Process memory; nothing survives exit
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Project storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Defaults to the platform data directory
    pub data_dir: Option<PathBuf>,
    pub max_projects: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: None,
            max_projects: MAX_PROJECTS,
        }
    }
}

impl StorageSettings {
    /// Configured data directory, else `<data dir>/gridframe/projects`
    pub fn resolved_data_dir(&self) -> SettingsResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR).join("projects"))
            .ok_or_else(|| SettingsError::ConfigDirectory("no platform data directory".to_string()))
    }
}

/// Defaults for new edit sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub cell_size_mm: f64,
    pub stroke_color: String,
    pub stroke_width_mm: f64,
    pub label_style: LabelStyle,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size_mm: DEFAULT_CELL_SIZE_MM,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width_mm: DEFAULT_STROKE_WIDTH_MM,
            label_style: LabelStyle::Both,
        }
    }
}

impl GridSettings {
    pub fn edit_defaults(&self) -> SettingsResult<EditDefaults> {
        let stroke_color: StrokeColor = self
            .stroke_color
            .parse()
            .map_err(|e: String| SettingsError::invalid("grid.stroke_color", e))?;
        Ok(EditDefaults {
            cell_size_mm: self.cell_size_mm,
            stroke_color,
            stroke_width_mm: self.stroke_width_mm,
            label_style: self.label_style,
        })
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSettings,
    pub grid: GridSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from `path`, or return defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.storage.max_projects == 0 {
            return Err(SettingsError::invalid("storage.max_projects", "must be at least 1"));
        }

        if !(self.grid.cell_size_mm.is_finite() && self.grid.cell_size_mm > 0.0) {
            return Err(SettingsError::invalid("grid.cell_size_mm", "must be > 0"));
        }

        if !(self.grid.stroke_width_mm.is_finite() && self.grid.stroke_width_mm > 0.0) {
            return Err(SettingsError::invalid("grid.stroke_width_mm", "must be > 0"));
        }

        self.grid.edit_defaults()?;

        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::invalid("logging.level", "must not be empty"));
        }

        Ok(())
    }
}

/// `<config dir>/gridframe/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join("config.toml"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no platform config directory".to_string()))
}
