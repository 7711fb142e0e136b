use patternkit_core::{Settings, SleeveSettings};
use tempfile::TempDir;

#[test]
fn test_settings_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.export.margin = 1.5;
    settings.curve.spline_samples = 80;
    settings.save_to_file(&path).unwrap();

    let loaded = Settings::load_from_file(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    let mut settings = Settings::default();
    settings.sleeve.cap_bias = 0.62;
    settings.export.pieces_per_row = 4;
    settings.save_to_file(&path).unwrap();

    let loaded = Settings::load_from_file(&path).unwrap();
    assert_eq!(loaded.sleeve.cap_bias, 0.62);
    assert_eq!(loaded.export.pieces_per_row, 4);
}

#[test]
fn test_partial_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[export]\npiece_spacing = 3.0\n").unwrap();

    let loaded = Settings::load_from_file(&path).unwrap();
    assert_eq!(loaded.export.piece_spacing, 3.0);
    assert_eq!(loaded.sleeve, SleeveSettings::default());
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.yaml");
    std::fs::write(&path, "export: {}").unwrap();

    let err = Settings::load_from_file(&path).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"sleeve": {"cap_bias": 1.5}}"#).unwrap();

    let err = Settings::load_from_file(&path).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load_from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, patternkit_core::Error::Io(_)));
}
