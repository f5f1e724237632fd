//! # DominoHub Server
//!
//! A self-hosted domino scoreboard built on `Axum` and `SurrealDB`.
//!
//! ## Example
//! ```no_run
//! use dhub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(8080)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum_server::Handle;
use dhub::domain::config::{ApiConfig, SslConfig};
use dhub::kernel::server::state::ApiState;
use dhub_database::Database;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Builder that takes a loaded [`ApiConfig`] to a ready-to-run [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Overrides just the listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Validates the configuration, connects to the database, registers the
    /// enabled feature slices, and assembles the shared state.
    ///
    /// # Errors
    /// * invalid UI build configuration (bad color literal, empty globs)
    /// * missing SSL certificate or key files
    /// * database connection or migration failure
    /// * a feature slice failing to initialize
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_ssl_paths(ssl)?;
        }
        self.cfg.ui.validate().context("Invalid UI build configuration")?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let db = self.connect_database().await?;
        let slices =
            dhub::init(&self.cfg, &db).map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let mut state = ApiState::builder().config(self.cfg).db(db);
        for slice in slices {
            state = state.register_slice(slice);
        }
        let state = state.build().context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }

    async fn connect_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder =
            Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);
        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }
}

fn check_ssl_paths(ssl: &SslConfig) -> Result<()> {
    if !ssl.cert.exists() {
        anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
    }
    if !ssl.key.exists() {
        anyhow::bail!("SSL key not found at: {}", ssl.key.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                "SECURITY: SSL private key {} has insecure permissions (should be 600)",
                ssl.key.display()
            );
        }
    }
    Ok(())
}

/// A fully initialized server, holding the shared [`ApiState`].
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Entry point: returns a fresh [`ServerBuilder`].
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Serves until SIGINT/SIGTERM, then drains connections within
    /// [`SHUTDOWN_GRACE`].
    ///
    /// # Errors
    /// Fails when the listen address cannot be bound or the TLS material
    /// cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        let app = router::init(self.state).into_make_service();

        let handle = Handle::<SocketAddr>::new();
        spawn_shutdown_watcher(handle.clone());

        match &cfg.server.ssl {
            Some(ssl) => {
                info!("Starting HTTPS server on https://{address}");
                let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTPS server failed")?;
            }
            None => {
                info!("Starting HTTP server on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTP server failed")?;
            }
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// The shared application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

fn spawn_shutdown_watcher(handle: Handle<SocketAddr>) {
    tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            error!("Error while waiting for shutdown signal: {e}");
            return;
        }
        info!("Shutdown signal received, starting graceful shutdown...");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });
}

/// Resolves when either SIGINT (Ctrl+C) or SIGTERM arrives.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
