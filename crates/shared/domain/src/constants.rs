//! Entity string constants shared between storage, routing, and feature slices.

/// Table name for domino matches.
pub const MATCH: &str = "match";
/// Feature key for the scoreboard slice.
pub const SCOREBOARD: &str = "scoreboard";

/// Fallback name for the first team when none is provided.
pub const DEFAULT_TEAM1_NAME: &str = "Team1";
/// Fallback name for the second team when none is provided.
pub const DEFAULT_TEAM2_NAME: &str = "Team2";

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for scoreboard endpoints.
pub const SCOREBOARD_TAG: &str = "Scoreboard";
