use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Custom error type for config loading.
#[dhub_derive::dhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Default file stem looked up in the working directory when no path is given.
const DEFAULT_CONFIG_STEM: &str = "server";

/// Loads a typed configuration with two layered sources:
///
/// 1. a required file (any format the `config` crate recognizes; defaults to
///    `server.*` in the working directory),
/// 2. environment overrides under the `DHUB__` prefix, with `__` as the
///    nesting separator (`DHUB__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// Fails when the file is missing or its content does not deserialize
/// into `T`.
///
/// # Example
/// ```rust
/// use dhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => File::from(p.as_ref()),
        None => File::with_name(DEFAULT_CONFIG_STEM),
    };
    info!(
        "Loading config from {}",
        path.as_ref().map_or(DEFAULT_CONFIG_STEM.into(), |p| p.as_ref().display().to_string())
    );

    let layered = Config::builder()
        .add_source(file.required(true))
        .add_source(Environment::with_prefix("DHUB").separator("__").convert_case(config::Case::Snake))
        .build()
        .context("Failed to build config")?;

    layered.try_deserialize::<T>().context("Failed to deserialize config")
}
