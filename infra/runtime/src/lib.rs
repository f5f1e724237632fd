//! # Runtime
//!
//! Standardized [Tokio](https://tokio.rs) runtime construction for the
//! workspace, so every binary gets the same thread sizing and naming rules.
//!
//! ## Profiles
//! * **High Performance**: bigger stacks and a long keep-alive for server loads.
//! * **Default**: worker count auto-detected from available parallelism.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[dhub_runtime::main(high_performance)]
//! async fn main() -> anyhow::Result<()> {
//!     println!("Running on a high-performance runtime!");
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use dhub_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Fallback worker count when parallelism detection fails.
const FALLBACK_WORKERS: usize = 4;
/// Upper bound on configurable worker threads.
const MAX_WORKERS: usize = 1024;
/// Default worker stack size (3 `MiB`).
const DEFAULT_STACK: usize = 3 * 1024 * 1024;
/// Stack sizes are clamped into this range (1 to 16 `MiB`).
const STACK_BOUNDS: (usize, usize) = (1024 * 1024, 16 * 1024 * 1024);
/// Default idle-thread keep-alive.
const KEEP_ALIVE: Duration = Duration::from_secs(60);
/// Name given to worker threads when none (or a blank one) is configured.
const DEFAULT_THREAD_NAME: &str = "thread-worker";

static DETECTED_WORKERS: OnceLock<usize> = OnceLock::new();

/// Worker count from `TOKIO_WORKER_THREADS` when set and sane, otherwise from
/// the hardware. Detected once per process.
fn detected_workers() -> usize {
    *DETECTED_WORKERS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= MAX_WORKERS)
            .unwrap_or_else(|| {
                available_parallelism().map(std::num::NonZero::get).unwrap_or(FALLBACK_WORKERS)
            })
    })
}

fn clamp_stack(stack_size: usize) -> usize {
    stack_size.clamp(STACK_BOUNDS.0, STACK_BOUNDS.1)
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detected_workers(),
            stack_size: DEFAULT_STACK,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: KEEP_ALIVE,
        }
    }
}

impl RuntimeConfig {
    /// Preset for high-throughput server applications.
    #[must_use = "Use this configuration for high-performance server applications"]
    pub fn high_performance() -> Self {
        Self {
            worker_threads: detected_workers(),
            stack_size: 4 * 1024 * 1024,
            thread_name: "thread-hp".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKERS);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = clamp_stack(size);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name =
            if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use = "Customize how long idle threads stay alive"]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    /// Copy of this config with every field forced into its valid range.
    fn normalized(&self) -> Self {
        Self {
            worker_threads: self.worker_threads.clamp(1, MAX_WORKERS),
            stack_size: clamp_stack(self.stack_size),
            thread_name: if self.thread_name.trim().is_empty() {
                DEFAULT_THREAD_NAME.to_owned()
            } else {
                self.thread_name.clone()
            },
            thread_keep_alive: self.thread_keep_alive,
        }
    }
}

/// Builds a multithreaded Tokio runtime (all features enabled) from the given
/// configuration, after clamping it into valid bounds.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] when the OS refuses to create the runtime,
/// typically from resource or thread-creation limits.
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_threads_are_clamped() {
        let config = RuntimeConfig::default().with_worker_threads(0);
        assert_eq!(config.worker_threads, 1);

        let config = RuntimeConfig::default().with_worker_threads(2000);
        assert_eq!(config.worker_threads, MAX_WORKERS);
    }

    #[test]
    fn stack_size_is_clamped() {
        let config = RuntimeConfig::default().with_stack_size(100);
        assert_eq!(config.stack_size, STACK_BOUNDS.0);

        let config = RuntimeConfig::default().with_stack_size(100 * 1024 * 1024);
        assert_eq!(config.stack_size, STACK_BOUNDS.1);
    }

    #[test]
    fn blank_thread_name_falls_back() {
        let config = RuntimeConfig::default().with_thread_name("   ");
        assert_eq!(config.thread_name, DEFAULT_THREAD_NAME);

        let normalized = RuntimeConfig { thread_name: " ".to_owned(), ..Default::default() }
            .normalized();
        assert_eq!(normalized.thread_name, DEFAULT_THREAD_NAME);
    }
}
