use dhub_domain::config::UiConfig;
use dhub_domain::scoring::{Match, TARGET_SCORE, Team};
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_hex_palettes_always_validate(value in "#[0-9a-fA-F]{6}") {
        let mut ui = UiConfig::default();
        ui.colors.insert("custom".to_owned(), value);
        prop_assert!(ui.validate().is_ok());
    }

    #[test]
    fn malformed_palette_entries_never_validate(
        value in "[0-9a-fA-F]{6}|#[0-9a-fA-F]{0,5}|#[0-9a-fA-F]{7,9}|#[g-z]{6}",
    ) {
        let mut ui = UiConfig::default();
        ui.colors.insert("custom".to_owned(), value);
        prop_assert!(ui.validate().is_err());
    }

    #[test]
    fn accepted_hands_accumulate_exactly(
        hands in proptest::collection::vec((0i64..100, 0i64..100), 1..50),
    ) {
        let mut m = Match::new("abc", "A", "B");
        let (mut team1_total, mut team2_total) = (0, 0);

        for (p1, p2) in hands {
            if m.add_hand(p1, p2).is_ok() {
                team1_total += p1;
                team2_total += p2;
            }
        }

        prop_assert_eq!(m.score(Team::One), team1_total);
        prop_assert_eq!(m.score(Team::Two), team2_total);
        prop_assert_eq!(
            m.game_over(),
            team1_total >= TARGET_SCORE || team2_total >= TARGET_SCORE
        );
    }
}
