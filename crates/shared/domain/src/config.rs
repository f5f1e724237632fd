use crate::features::FeatureSet;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub features: FeatureSet,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (optional when using unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Storage roots (data and static assets).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

/// Utility-CSS build configuration for the scoreboard pages.
///
/// Mirrors the `tailwind.config.js` shipped with the static assets: the
/// template globs scanned for class names, the extended color palette, and
/// the plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub content: Vec<String>,
    pub colors: BTreeMap<String, String>,
    pub plugins: Vec<String>,
}

/// Problems detected by [`UiConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiConfigError {
    #[error("content globs must not be empty")]
    EmptyContent,
    #[error("empty content glob at index {0}")]
    BlankGlob(usize),
    #[error("color `{name}` has invalid hex value `{value}`")]
    InvalidColor { name: String, value: String },
}

impl UiConfig {
    /// Checks that the template globs are usable and every palette entry is
    /// a `#rrggbb` hex color.
    ///
    /// # Errors
    /// Returns the first [`UiConfigError`] encountered.
    pub fn validate(&self) -> Result<(), UiConfigError> {
        if self.content.is_empty() {
            return Err(UiConfigError::EmptyContent);
        }
        for (index, glob) in self.content.iter().enumerate() {
            if glob.trim().is_empty() {
                return Err(UiConfigError::BlankGlob(index));
            }
        }
        for (name, value) in &self.colors {
            if !is_hex_color(value) {
                return Err(UiConfigError::InvalidColor {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8080, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "dhub".to_owned(),
            database: "core".to_owned(),
            credentials: Some(DatabaseCredentials::default()),
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("."), static_dir: PathBuf::from("public") }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            content: vec!["./templates/*.html".to_owned()],
            colors: BTreeMap::from([
                ("firstcolor".to_owned(), "#feffdf".to_owned()),
                ("secondcolor".to_owned(), "#dde0ab".to_owned()),
                ("thirdcolor".to_owned(), "#97cba9".to_owned()),
                ("fourthcolor".to_owned(), "#668ba4".to_owned()),
            ]),
            plugins: Vec::new(),
        }
    }
}
