use learn_core::achievements::check_achievements;
use learn_core::model::{Catalog, Percent, ProgressRecord, SectionId, level_for_xp};
use learn_core::time::fixed_clock;
use proptest::prelude::*;

proptest! {
    #[test]
    fn total_xp_is_the_sum_of_awards(amounts in prop::collection::vec(0_u32..2_000, 0..40)) {
        let mut record = ProgressRecord::initial(&fixed_clock());
        let mut expected = 0_u32;
        for amount in amounts {
            let before = record.total_xp();
            record.add_xp(amount);
            expected += amount;
            prop_assert!(record.total_xp() >= before);
            prop_assert_eq!(record.total_xp(), expected);
            prop_assert_eq!(record.current_level(), level_for_xp(expected));
        }
    }

    #[test]
    fn repeated_completion_keeps_one_entry_and_last_score(scores in prop::collection::vec(0_u32..=100, 1..10)) {
        let mut record = ProgressRecord::initial(&fixed_clock());
        let id = SectionId::new("basics").unwrap();
        for score in &scores {
            record.complete_section(id.clone(), Percent::new(*score).unwrap());
        }
        prop_assert_eq!(record.completed_sections(), &[id.clone()][..]);
        let last = Percent::new(*scores.last().unwrap()).unwrap();
        prop_assert_eq!(record.section_score(&id), Some(last));
    }

    #[test]
    fn achievements_are_never_reported_twice(steps in prop::collection::vec((0_usize..7, 0_u32..=100, 0_u32..400), 1..20)) {
        let catalog = Catalog::builtin();
        let mut record = ProgressRecord::initial(&fixed_clock());
        let mut seen = Vec::new();
        for (section, score, xp) in steps {
            let id = catalog.sections()[section].id.clone();
            record.add_xp(xp);
            record.complete_section(id, Percent::new(score).unwrap());
            for achievement in check_achievements(&mut record, catalog.achievements()) {
                prop_assert!(!seen.contains(&achievement.id));
                seen.push(achievement.id.clone());
            }
        }
        prop_assert_eq!(record.unlocked_achievements(), &seen[..]);
    }
}
