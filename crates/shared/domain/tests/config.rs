use dhub_domain::config::{ApiConfig, DatabaseConfig, ServerConfig, StorageConfig, UiConfig, UiConfigError};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8080);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "dhub");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_some());

    let storage = StorageConfig::default();
    assert_eq!(storage.static_dir, std::path::PathBuf::from("public"));
}

#[test]
fn ui_defaults_match_shipped_palette() {
    let ui = UiConfig::default();

    assert_eq!(ui.content, vec!["./templates/*.html".to_owned()]);
    assert!(ui.plugins.is_empty());

    assert_eq!(ui.colors.len(), 4);
    assert_eq!(ui.colors.get("firstcolor").map(String::as_str), Some("#feffdf"));
    assert_eq!(ui.colors.get("secondcolor").map(String::as_str), Some("#dde0ab"));
    assert_eq!(ui.colors.get("thirdcolor").map(String::as_str), Some("#97cba9"));
    assert_eq!(ui.colors.get("fourthcolor").map(String::as_str), Some("#668ba4"));

    ui.validate().expect("shipped palette validates");
}

#[test]
fn ui_validation_rejects_bad_values() {
    let mut ui = UiConfig::default();
    ui.content.clear();
    assert_eq!(ui.validate(), Err(UiConfigError::EmptyContent));

    let mut ui = UiConfig::default();
    ui.content.push("   ".to_owned());
    assert_eq!(ui.validate(), Err(UiConfigError::BlankGlob(1)));

    let mut ui = UiConfig::default();
    ui.colors.insert("accent".to_owned(), "#12345".to_owned());
    assert!(matches!(ui.validate(), Err(UiConfigError::InvalidColor { .. })));

    let mut ui = UiConfig::default();
    ui.colors.insert("accent".to_owned(), "feffdf".to_owned());
    assert!(matches!(ui.validate(), Err(UiConfigError::InvalidColor { .. })));

    let mut ui = UiConfig::default();
    ui.colors.insert("accent".to_owned(), "#feffzz".to_owned());
    assert!(matches!(ui.validate(), Err(UiConfigError::InvalidColor { .. })));
}

#[test]
fn ui_colors_iterate_in_stable_order() {
    let ui = UiConfig::default();
    let names: Vec<&str> = ui.colors.keys().map(String::as_str).collect();
    assert_eq!(names, ["firstcolor", "fourthcolor", "secondcolor", "thirdcolor"]);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 9090 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "storage": { "data_dir": "/tmp/data", "static_dir": "/tmp/static" },
        "ui": { "content": ["./pages/*.html"], "colors": { "accent": "#112233" }, "plugins": [] }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9090);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("/tmp/static"));
    assert_eq!(cfg.ui.content, vec!["./pages/*.html".to_owned()]);
    assert_eq!(cfg.ui.colors.get("accent").map(String::as_str), Some("#112233"));
}
