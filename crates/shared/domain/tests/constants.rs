use dhub_domain::constants::{DEFAULT_TEAM1_NAME, DEFAULT_TEAM2_NAME, MATCH, SCOREBOARD};

#[test]
fn constants_match_entity_strings() {
    assert_eq!(MATCH, "match");
    assert_eq!(SCOREBOARD, "scoreboard");
    assert_eq!(DEFAULT_TEAM1_NAME, "Team1");
    assert_eq!(DEFAULT_TEAM2_NAME, "Team2");
}
