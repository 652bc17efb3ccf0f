use gridframe_designer::LabelStyle;
use gridframe_settings::{Config, SettingsError, StorageBackend};
use std::path::PathBuf;
use tempfile::TempDir;

fn sample() -> Config {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    config.storage.data_dir = Some(PathBuf::from("/var/lib/gridframe"));
    config.storage.max_projects = 10;
    config.grid.cell_size_mm = 25.0;
    config.grid.stroke_color = "#00FF00".to_string();
    config.grid.label_style = LabelStyle::Row;
    config.logging.json = true;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    sample().save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    sample().save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[storage]\nmax_projects = 0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    std::fs::write(&path, "not = [valid").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_unsupported_extension_is_not_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.ini");
    assert!(matches!(
        Config::default().save_to_file(&path),
        Err(SettingsError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_edit_defaults_from_config() {
    let defaults = sample().grid.edit_defaults().unwrap();
    assert_eq!(defaults.cell_size_mm, 25.0);
    assert_eq!(defaults.stroke_color.as_str(), "#00FF00");
    assert_eq!(defaults.label_style, LabelStyle::Row);
}
