use dhub_domain::scoring::{Match, ScoringError, TARGET_SCORE, Team};

#[test]
fn new_match_starts_at_zero() {
    let m = Match::new("abc", "Reds", "Blues");
    assert_eq!(m.team1_name, "Reds");
    assert_eq!(m.team2_name, "Blues");
    assert_eq!(m.score(Team::One), 0);
    assert_eq!(m.score(Team::Two), 0);
    assert!(!m.game_over());
    assert!(m.winner().is_none());
}

#[test]
fn blank_names_fall_back_to_defaults() {
    let m = Match::new("abc", "", "   ");
    assert_eq!(m.team1_name, "Team1");
    assert_eq!(m.team2_name, "Team2");
}

#[test]
fn add_points_accumulates_per_team() {
    let mut m = Match::new("abc", "A", "B");
    m.add_points(Team::One, 25).expect("add points");
    m.add_points(Team::One, 30).expect("add points");
    m.add_points(Team::Two, 40).expect("add points");

    assert_eq!(m.score(Team::One), 55);
    assert_eq!(m.score(Team::Two), 40);
}

#[test]
fn negative_points_are_rejected() {
    let mut m = Match::new("abc", "A", "B");
    assert_eq!(m.add_points(Team::One, -1), Err(ScoringError::NegativePoints));
    assert_eq!(m.score(Team::One), 0);
}

#[test]
fn reaching_target_ends_the_match() {
    let mut m = Match::new("abc", "A", "B");
    m.add_points(Team::Two, TARGET_SCORE).expect("add points");

    assert!(m.game_over());
    assert_eq!(m.winner(), Some(Team::Two));
    assert_eq!(m.add_points(Team::One, 10), Err(ScoringError::GameOver));
    assert_eq!(m.add_points(Team::Two, 10), Err(ScoringError::GameOver));
    assert_eq!(m.score(Team::One), 0);
    assert_eq!(m.score(Team::Two), TARGET_SCORE);
}

#[test]
fn add_hand_credits_both_teams_at_once() {
    let mut m = Match::new("abc", "A", "B");
    m.add_hand(30, 25).expect("add hand");
    assert_eq!(m.score(Team::One), 30);
    assert_eq!(m.score(Team::Two), 25);

    assert_eq!(m.add_hand(-1, 5), Err(ScoringError::NegativePoints));

    // The winning hand still credits the losing team's points.
    m.add_hand(TARGET_SCORE, 15).expect("winning hand");
    assert!(m.game_over());
    assert_eq!(m.score(Team::Two), 40);
    assert_eq!(m.add_hand(1, 1), Err(ScoringError::GameOver));
}

#[test]
fn huge_point_values_saturate_instead_of_overflowing() {
    let mut m = Match::new("abc", "A", "B");
    m.add_points(Team::One, i64::MAX).expect("add points");
    assert_eq!(m.score(Team::One), i64::MAX);
    assert!(m.game_over());

    let mut m = Match::new("abc", "A", "B");
    m.add_hand(50, 0).expect("add hand");
    m.add_hand(i64::MAX, i64::MAX).expect("winning hand");
    assert_eq!(m.score(Team::One), i64::MAX);
    assert_eq!(m.score(Team::Two), i64::MAX);
    assert_eq!(m.winner(), Some(Team::One));
}

#[test]
fn zero_points_are_allowed_while_running() {
    let mut m = Match::new("abc", "A", "B");
    m.add_points(Team::One, 0).expect("zero is a valid hand");
    assert_eq!(m.score(Team::One), 0);
}
