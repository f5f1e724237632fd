//! Domino match scoring rules.
//!
//! A match is played between two teams; the first team to reach
//! [`TARGET_SCORE`] points wins and no further scoring is accepted.

use crate::constants::{DEFAULT_TEAM1_NAME, DEFAULT_TEAM2_NAME};
use serde::{Deserialize, Serialize};

/// Points a team needs to win the match.
pub const TARGET_SCORE: i64 = 200;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    One,
    Two,
}

/// Rule violations raised by [`Match::add_points`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("points cannot be negative")]
    NegativePoints,
    #[error("match is already over")]
    GameOver,
}

/// A domino match between two teams with a running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub team1_score: i64,
    pub team2_score: i64,
}

impl Match {
    /// Creates a fresh match with zeroed scores.
    ///
    /// Blank team names fall back to [`DEFAULT_TEAM1_NAME`] / [`DEFAULT_TEAM2_NAME`].
    pub fn new(id: impl Into<String>, team1_name: &str, team2_name: &str) -> Self {
        Self {
            id: id.into(),
            team1_name: fallback_name(team1_name, DEFAULT_TEAM1_NAME),
            team2_name: fallback_name(team2_name, DEFAULT_TEAM2_NAME),
            team1_score: 0,
            team2_score: 0,
        }
    }

    /// The current score of the given team.
    #[must_use]
    pub const fn score(&self, team: Team) -> i64 {
        match team {
            Team::One => self.team1_score,
            Team::Two => self.team2_score,
        }
    }

    /// Whether either team has reached [`TARGET_SCORE`].
    #[must_use]
    pub const fn game_over(&self) -> bool {
        self.team1_score >= TARGET_SCORE || self.team2_score >= TARGET_SCORE
    }

    /// The winning team, if the match is over.
    #[must_use]
    pub const fn winner(&self) -> Option<Team> {
        if self.team1_score >= TARGET_SCORE {
            Some(Team::One)
        } else if self.team2_score >= TARGET_SCORE {
            Some(Team::Two)
        } else {
            None
        }
    }

    /// Adds points to a team's score.
    ///
    /// # Errors
    /// * [`ScoringError::NegativePoints`] if `points` is negative.
    /// * [`ScoringError::GameOver`] if a team already reached [`TARGET_SCORE`].
    pub const fn add_points(&mut self, team: Team, points: i64) -> Result<(), ScoringError> {
        if points < 0 {
            return Err(ScoringError::NegativePoints);
        }
        if self.game_over() {
            return Err(ScoringError::GameOver);
        }
        // Saturate so absurd point values cannot overflow the score.
        match team {
            Team::One => self.team1_score = self.team1_score.saturating_add(points),
            Team::Two => self.team2_score = self.team2_score.saturating_add(points),
        }
        Ok(())
    }

    /// Records one played hand, crediting both teams at once.
    ///
    /// The game-over check happens once up front, so a hand that pushes a
    /// team past [`TARGET_SCORE`] still credits the other team's points.
    ///
    /// # Errors
    /// * [`ScoringError::NegativePoints`] if either value is negative.
    /// * [`ScoringError::GameOver`] if a team already reached [`TARGET_SCORE`].
    pub const fn add_hand(
        &mut self,
        team1_points: i64,
        team2_points: i64,
    ) -> Result<(), ScoringError> {
        if team1_points < 0 || team2_points < 0 {
            return Err(ScoringError::NegativePoints);
        }
        if self.game_over() {
            return Err(ScoringError::GameOver);
        }
        self.team1_score = self.team1_score.saturating_add(team1_points);
        self.team2_score = self.team2_score.saturating_add(team2_points);
        Ok(())
    }
}

fn fallback_name(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() { fallback.to_owned() } else { trimmed.to_owned() }
}
