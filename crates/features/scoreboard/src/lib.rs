//! Domino scoreboard feature slice.
mod error;
#[cfg(feature = "server")]
mod repository;
#[cfg(feature = "server")]
mod routes;

pub use error::{ScoreboardError, ScoreboardErrorExt};
#[cfg(feature = "server")]
pub use repository::MatchRepository;
#[cfg(feature = "server")]
pub use routes::router;

#[cfg(feature = "server")]
use dhub_kernel::domain::registry::InitializedSlice;

/// Scoreboard feature state.
#[dhub_derive::dhub_slice]
pub struct Scoreboard {
    #[cfg(feature = "server")]
    pub matches: MatchRepository,
}

/// Initialize the scoreboard feature.
///
/// # Errors
/// Returns an error if the slice state cannot be constructed.
#[cfg(feature = "server")]
pub fn init(database: &dhub_database::Database) -> Result<InitializedSlice, ScoreboardError> {
    tracing::info!("Scoreboard slice initialized");

    let inner = ScoreboardInner { matches: MatchRepository::new(database.clone()) };

    let slice = Scoreboard::new(inner);
    Ok(InitializedSlice::new(slice))
}
