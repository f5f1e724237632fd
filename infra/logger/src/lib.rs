//! # Logger
//!
//! Workspace-wide tracing setup: a typestate builder that installs the global
//! subscriber with an optional compact console layer and an optional rolling
//! file layer behind a non-blocking writer.
//!
//! * Optional `profiling` support requires building with
//!   `--cfg tokio_unstable` (see notes in [`LoggerBuilder::init`]).
//! * [`LoggerBuilder::env_filter`] sets a programmatic filter default
//!   (e.g., `"dhub=debug,hyper=info"`); `RUST_LOG` still wins at runtime.
//!
//! ## Example
//!
//! ```rust
//! # use dhub_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("my-app")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use sealed::Stage;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_KEPT_FILES: usize = 10;
const FILE_SUFFIX: &str = "log";

mod sealed {
    pub trait Stage {}
}

/// Typestate markers: a name is mandatory, file options only unlock after
/// [`LoggerBuilder::path`].
#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

impl Stage for NoName {}
impl Stage for WithName {}
impl Stage for NoFile {}
impl Stage for WithFile {}

/// Builder for the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Stage = NoName, F: Stage = NoFile> {
    name: N,
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
    _file: PhantomData<F>,
}

impl<F: Stage> LoggerBuilder<NoName, F> {
    /// Names the logger; the name prefixes rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder {
            name: WithName(name.into()),
            console: self.console,
            path: self.path,
            level: self.level,
            rotation: self.rotation,
            max_files: self.max_files,
            json: self.json,
            env_filter: self.env_filter,
            _file: PhantomData,
        }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Caps how many rolled log files are kept on disk.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Selects the file rotation cadence.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Switches the file layer to JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

impl<F: Stage> LoggerBuilder<WithName, F> {
    /// Minimum level emitted when no filter directive matches.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Programmatic filter default (e.g., `dhub=debug,hyper=info`).
    ///
    /// `RUST_LOG` still overrides this at runtime. An unparsable filter makes
    /// [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Toggles the console layer.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enables file logging into `path`, unlocking the rotation options.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        LoggerBuilder {
            name: self.name,
            console: self.console,
            path: Some(path.into()),
            level: self.level,
            rotation: self.rotation,
            max_files: self.max_files,
            json: self.json,
            env_filter: self.env_filter,
            _file: PhantomData,
        }
    }

    /// Installs the global subscriber and hands back the [`Logger`] guard.
    ///
    /// The returned handle owns the non-blocking file writer's [`WorkerGuard`];
    /// keep it alive for the life of the process or buffered lines are lost.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber is already set,
    /// [`LoggerError::InvalidConfiguration`] for bad builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.0.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        let filter = self.filter()?;
        let mut layers = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if self.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if self.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &self.path {
            Some(path) => {
                let (file_layer, guard) = self.file_layer(path)?;
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }

    fn filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(filter) => {
                builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{filter}': {e}").into(),
                    context: None,
                })
            }
        }
    }

    fn file_layer<S>(
        &self,
        path: &Path,
    ) -> Result<(Box<dyn Layer<S> + Send + Sync>, WorkerGuard), LoggerError>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some(format!("Failed to create path: {}", path.display()).into()),
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(&self.name.0)
            .filename_suffix(FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(path)?;

        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = layer().with_writer(writer).with_ansi(false);

        let boxed = if self.json { file_layer.json().boxed() } else { file_layer.boxed() };
        Ok((boxed, guard))
    }
}

/// Handle to the installed logging system.
///
/// Holds the background writer guard; drop only at process shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a [`LoggerBuilder`].
    ///
    /// The `name` set on the builder prefixes rolling log files
    /// (e.g., `my-app.2026-08-30.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            name: NoName,
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_KEPT_FILES,
            json: false,
            env_filter: None,
            _file: PhantomData,
        }
    }

    /// Best-effort synchronization point before shutdown; the real flush
    /// happens when the handle drops.
    pub fn flush(&self) {
        tracing::debug!("Logger flushed");
    }

    /// The non-blocking writer guard, when file logging is on.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}
