//! Achievement evaluation over a progress record.

use crate::model::{Achievement, ProgressRecord};

/// Unlocks every achievement whose rule holds and grants its XP reward.
///
/// Achievements are visited in catalog order and each rule sees the record
/// as already updated by earlier unlocks in the same pass, so an unlock can
/// make a later achievement eligible (e.g. an XP threshold reached through a
/// reward, or an "unlock N achievements" rule). Unlocked achievements are
/// skipped and never revoked.
///
/// Returns the newly unlocked achievements in catalog order.
pub fn check_achievements<'a>(
    record: &mut ProgressRecord,
    achievements: &'a [Achievement],
) -> Vec<&'a Achievement> {
    let mut unlocked = Vec::new();
    for achievement in achievements {
        if record.is_unlocked(&achievement.id) || !achievement.rule.is_met(record) {
            continue;
        }
        record.unlock_achievement(&achievement.id);
        record.add_xp(achievement.xp_reward);
        unlocked.push(achievement);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AchievementId, AchievementRule, Percent, SectionId};
    use crate::time::fixed_clock;

    fn def(id: &str, xp_reward: u32, rule: AchievementRule) -> Achievement {
        Achievement {
            id: AchievementId::new(id).unwrap(),
            title: id.to_uppercase(),
            description: String::new(),
            icon: String::new(),
            xp_reward,
            rule,
        }
    }

    fn ids(list: &[&Achievement]) -> Vec<String> {
        list.iter().map(|a| a.id.to_string()).collect()
    }

    #[test]
    fn first_section_unlocks_reward() {
        let defs = vec![def(
            "first_steps",
            50,
            AchievementRule::SectionsCompleted { at_least: 1 },
        )];
        let mut record = ProgressRecord::initial(&fixed_clock());
        record.add_xp(85);
        record.complete_section(SectionId::new("basics").unwrap(), Percent::new(85).unwrap());

        let unlocked = check_achievements(&mut record, &defs);

        assert_eq!(ids(&unlocked), vec!["first_steps"]);
        assert!(record.is_unlocked(&defs[0].id));
        assert_eq!(record.total_xp(), 135);
    }

    #[test]
    fn unlocks_are_reported_once() {
        let defs = vec![def("xp", 10, AchievementRule::TotalXp { at_least: 0 })];
        let mut record = ProgressRecord::initial(&fixed_clock());

        assert_eq!(check_achievements(&mut record, &defs).len(), 1);
        record.add_xp(1000);
        assert!(check_achievements(&mut record, &defs).is_empty());
        assert_eq!(record.unlocked_achievements().len(), 1);
        assert_eq!(record.total_xp(), 1010);
    }

    #[test]
    fn nothing_unlocks_when_no_rule_holds() {
        let defs = vec![def("streak", 50, AchievementRule::LoginStreak { at_least: 3 })];
        let mut record = ProgressRecord::initial(&fixed_clock());
        assert!(check_achievements(&mut record, &defs).is_empty());
        assert_eq!(record.total_xp(), 0);
    }

    #[test]
    fn earlier_reward_can_unlock_later_achievement_in_same_pass() {
        let defs = vec![
            def("first", 100, AchievementRule::SectionsCompleted { at_least: 1 }),
            def("rich", 0, AchievementRule::TotalXp { at_least: 100 }),
        ];
        let mut record = ProgressRecord::initial(&fixed_clock());
        record.complete_section(SectionId::new("basics").unwrap(), Percent::ZERO);

        let unlocked = check_achievements(&mut record, &defs);
        assert_eq!(ids(&unlocked), vec!["first", "rich"]);
    }

    #[test]
    fn cascade_only_flows_forward_in_catalog_order() {
        // "rich" is listed before the achievement whose reward would qualify it.
        let defs = vec![
            def("rich", 0, AchievementRule::TotalXp { at_least: 100 }),
            def("first", 100, AchievementRule::SectionsCompleted { at_least: 1 }),
        ];
        let mut record = ProgressRecord::initial(&fixed_clock());
        record.complete_section(SectionId::new("basics").unwrap(), Percent::ZERO);

        assert_eq!(ids(&check_achievements(&mut record, &defs)), vec!["first"]);
        // picked up on the next evaluation
        assert_eq!(ids(&check_achievements(&mut record, &defs)), vec!["rich"]);
    }

    #[test]
    fn collector_counts_unlocks_from_the_same_pass() {
        let defs = vec![
            def("a", 0, AchievementRule::TotalXp { at_least: 0 }),
            def("b", 0, AchievementRule::LoginStreak { at_least: 1 }),
            def("collector", 25, AchievementRule::AchievementsUnlocked { at_least: 2 }),
        ];
        let mut record = ProgressRecord::initial(&fixed_clock());

        let unlocked = check_achievements(&mut record, &defs);
        assert_eq!(ids(&unlocked), vec!["a", "b", "collector"]);
        assert_eq!(record.total_xp(), 25);
    }
}
