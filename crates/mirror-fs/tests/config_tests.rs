use mirror_fs::{ConfigStore, Error};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(
        &file_path,
        r#"name = "test"
count = 42"#,
    )
    .unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config.name, "test");
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, r#"{"name": "test", "count": 42}"#).unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config.name, "test");
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_yml_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.YML");
    fs::write(&file_path, "name: test\ncount: 42").unwrap();

    let config: TestConfig = ConfigStore::new().load(&file_path).unwrap();

    assert_eq!(config.count, 42);
}

#[test]
fn test_load_malformed_reports_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "name = ").unwrap();

    let err = ConfigStore::new().load::<TestConfig>(&file_path).unwrap_err();

    match err {
        Error::ConfigParse { format, path, .. } => {
            assert_eq!(format, "TOML");
            assert_eq!(path, file_path);
        }
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.ini");

    let err = ConfigStore::new().load::<TestConfig>(&file_path).unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat { extension } if extension == "ini"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("absent.json");

    let err = ConfigStore::new().load::<TestConfig>(&file_path).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
