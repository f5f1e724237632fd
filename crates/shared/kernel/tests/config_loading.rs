use dhub_domain::config::ApiConfig;
use dhub_kernel::config::load_config;
use serial_test::serial;
use std::fs;

#[test]
#[serial]
fn loads_file_and_fills_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9000

[database]
url = "mem://"
namespace = "test_ns"
database = "test_db"
"#,
    )
    .expect("write config");

    let cfg: ApiConfig = load_config(Some(path.with_extension(""))).expect("config loads");

    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.namespace, "test_ns");
    assert_eq!(cfg.database.database, "test_db");

    // Sections absent from the file fall back to defaults.
    assert_eq!(cfg.ui.content, vec!["./templates/*.html".to_owned()]);
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("public"));
}

#[test]
#[serial]
fn ui_palette_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r##"
[ui]
content = ["./pages/*.html"]

[ui.colors]
accent = "#112233"
"##,
    )
    .expect("write config");

    let cfg: ApiConfig = load_config(Some(path.with_extension(""))).expect("config loads");

    assert_eq!(cfg.ui.content, vec!["./pages/*.html".to_owned()]);
    assert_eq!(cfg.ui.colors.get("accent").map(String::as_str), Some("#112233"));
    cfg.ui.validate().expect("palette validates");
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let result = load_config::<ApiConfig>(Some("/definitely/not/here/server"));
    assert!(result.is_err());
}
