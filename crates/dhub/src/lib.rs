//! Facade crate for `DominoHub`.
//!
//! Binaries depend on `dhub` alone: it re-exports the domain and kernel
//! crates and wires up every feature slice during startup. No business logic
//! lives here.
//!
//! ## Usage
//! - Add `dhub` with the `server` feature flag.
//! - Call [`init`] after the database is up to register feature slices.

#[cfg(feature = "server")]
use dhub_database::Database;
pub use dhub_domain as domain;
#[cfg(feature = "server")]
use dhub_domain::config::ApiConfig;
#[cfg(feature = "server")]
use dhub_domain::features::FeatureSet;
pub use dhub_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use dhub_kernel::server::router::system_router;
        pub use dhub_scoreboard::router as scoreboard_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use dhub_scoreboard as scoreboard;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "scoreboard",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initializes every slice enabled both at build time and in the `features`
/// config bitset, in registration order.
///
/// # Errors
/// Returns the first slice initialization error.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
    database: &Database,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    if config.features.contains(FeatureSet::SCOREBOARD) {
        slices.push(features::scoreboard::init(database)?);
    }

    Ok(slices)
}
