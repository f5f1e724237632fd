use crate::error::{ScoreboardError, ScoreboardErrorExt};
use dhub_database::{Database, DatabaseError};
use dhub_kernel::domain::constants::MATCH;
use dhub_kernel::domain::scoring::Match;
use dhub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

const SELECT_MATCH: &str = "
    SELECT record::id(id) AS id, team1_name, team2_name, team1_score, team2_score
    FROM type::record($table, $id)
";

const CREATE_MATCH: &str = "
    CREATE type::record($table, $id)
    SET team1_name = $team1_name, team2_name = $team2_name,
        team1_score = $team1_score, team2_score = $team2_score
    RETURN NONE
";

const UPDATE_MATCH: &str = "
    UPDATE type::record($table, $id)
    SET team1_name = $team1_name, team2_name = $team2_name,
        team1_score = $team1_score, team2_score = $team2_score
    RETURN NONE
";

/// Row shape returned by [`SELECT_MATCH`].
#[derive(Debug, SurrealValue)]
struct MatchRecord {
    id: String,
    team1_name: String,
    team2_name: String,
    team1_score: i64,
    team2_score: i64,
}

impl From<MatchRecord> for Match {
    fn from(record: MatchRecord) -> Self {
        Self {
            id: record.id,
            team1_name: record.team1_name,
            team2_name: record.team2_name,
            team1_score: record.team1_score,
            team2_score: record.team2_score,
        }
    }
}

/// Persistence layer for domino matches.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db: Database,
}

impl MatchRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates a new match with a generated ID and zeroed scores.
    ///
    /// # Errors
    /// Returns [`ScoreboardError::Database`] if the insert fails.
    pub async fn create(
        &self,
        team1_name: &str,
        team2_name: &str,
    ) -> Result<Match, ScoreboardError> {
        let created = Match::new(safe_nanoid!(), team1_name, team2_name);

        self.db
            .query(CREATE_MATCH)
            .bind(("table", MATCH))
            .bind(("id", created.id.clone()))
            .bind(("team1_name", created.team1_name.clone()))
            .bind(("team2_name", created.team2_name.clone()))
            .bind(("team1_score", created.team1_score))
            .bind(("team2_score", created.team2_score))
            .await
            .and_then(|response| response.check())
            .map_err(DatabaseError::from)
            .context("Creating match")?;

        tracing::debug!(id = %created.id, "Match created");
        Ok(created)
    }

    /// Fetches a match by its key, returning `None` when absent.
    ///
    /// # Errors
    /// Returns [`ScoreboardError::Database`] if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Match>, ScoreboardError> {
        let record = self
            .db
            .query(SELECT_MATCH)
            .bind(("table", MATCH))
            .bind(("id", id.to_owned()))
            .await
            .and_then(|mut response| response.take::<Option<MatchRecord>>(0))
            .map_err(DatabaseError::from)
            .context("Loading match")?;

        Ok(record.map(Match::from))
    }

    /// Rewrites names and scores for an existing match.
    ///
    /// # Errors
    /// Returns [`ScoreboardError::Database`] if persistence fails.
    pub async fn update(&self, updated: &Match) -> Result<(), ScoreboardError> {
        self.db
            .query(UPDATE_MATCH)
            .bind(("table", MATCH))
            .bind(("id", updated.id.clone()))
            .bind(("team1_name", updated.team1_name.clone()))
            .bind(("team2_name", updated.team2_name.clone()))
            .bind(("team1_score", updated.team1_score))
            .bind(("team2_score", updated.team2_score))
            .await
            .and_then(|response| response.check())
            .map_err(DatabaseError::from)
            .context("Updating match")?;

        tracing::debug!(id = %updated.id, "Match updated");
        Ok(())
    }

    /// Records one played hand against a running match and persists the new
    /// scores.
    ///
    /// # Errors
    /// * [`ScoreboardError::NotFound`] if the match does not exist.
    /// * [`ScoreboardError::NegativePoints`] if either value is negative.
    /// * [`ScoreboardError::GameOver`] if the match has already been won.
    /// * [`ScoreboardError::Database`] if persistence fails.
    pub async fn add_points(
        &self,
        id: &str,
        team1_points: i64,
        team2_points: i64,
    ) -> Result<Match, ScoreboardError> {
        let mut current = self
            .get(id)
            .await?
            .ok_or_else(|| ScoreboardError::NotFound { id: id.to_owned(), context: None })?;

        current.add_hand(team1_points, team2_points)?;
        self.update(&current).await?;

        tracing::debug!(id = %current.id, team1_points, team2_points, "Scores updated");
        Ok(current)
    }
}
