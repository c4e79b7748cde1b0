use sheetdxf_core::config::{ConfigError, Settings};
use sheetdxf_core::model::{LayerSpec, BLUE, RED};
use std::fs;

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    settings.validate().expect("defaults validate");
    assert_eq!("info", settings.logging.level);
    assert_eq!(1e-6, settings.join.tolerance);
    assert!(settings.join.drop_zero_length);
    assert!(settings.join.drop_duplicates);
    assert_eq!(LayerSpec::new("OUTER_LOOP", RED), settings.color.outer());
    assert_eq!(LayerSpec::new("INNER_LOOP", BLUE), settings.color.inner());
    assert_eq!("dims.json", settings.export.dims_file);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let settings = Settings::from_toml_str(
        r#"
[join]
tolerance = 0.01

[color]
inner_layer = "HOLES"
inner_color = 3
"#,
    )
    .expect("parse");

    assert_eq!(0.01, settings.join.tolerance);
    assert!(settings.join.drop_duplicates);
    assert_eq!("OUTER_LOOP", settings.color.outer_layer);
    assert_eq!(LayerSpec::new("HOLES", 3), settings.color.inner());
    assert_eq!(Settings::default().export, settings.export);
}

#[test]
fn printed_settings_parse_back() {
    let mut settings = Settings::default();
    settings.join.tolerance = 0.5;
    settings.export.exclude.push("copy".to_string());

    let text = settings.to_toml_string().expect("serialize");
    assert!(text.contains("OUTER_LOOP"));
    assert_eq!(settings, Settings::from_toml_str(&text).expect("parse"));
}

#[test]
fn rejects_bad_values() {
    let mut settings = Settings::default();
    settings.join.tolerance = 0.0;
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::Invalid { field: "join.tolerance", .. })
    ));

    let mut settings = Settings::default();
    settings.color.tolerance = f64::NAN;
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::Invalid { field: "color.tolerance", .. })
    ));

    let mut settings = Settings::default();
    settings.color.inner_color = 0;
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::Invalid { field: "color.inner_color", .. })
    ));

    let mut settings = Settings::default();
    settings.color.inner_layer = "outer_loop".to_string();
    assert!(matches!(
        settings.validate(),
        Err(ConfigError::Invalid { field: "color.inner_layer", .. })
    ));
}

#[test]
fn discover_prefers_the_explicit_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("write");

    let settings = Settings::discover(Some(path.as_path())).expect("discover");
    assert_eq!("debug", settings.logging.level);
}

#[test]
fn missing_or_malformed_files_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        Settings::discover(Some(missing.as_path())),
        Err(ConfigError::Io { .. })
    ));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[join\ntolerance = ").expect("write");
    assert!(matches!(
        Settings::from_file(&broken),
        Err(ConfigError::Parse { .. })
    ));
}
