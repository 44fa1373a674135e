//! CLI command implementations

pub mod db;
pub mod learn;
pub mod status;
pub mod transfer;

use learn_core::model::{Achievement, XpGain};

pub(crate) fn print_xp_gain(gain: &XpGain) {
    println!("+{} XP (total {})", gain.amount, gain.total_xp);
    if gain.leveled_up() {
        println!(
            "Level up! {} Level {}: {}",
            gain.after.icon, gain.after.number, gain.after.title
        );
    }
}

pub(crate) fn print_unlocked(unlocked: &[Achievement]) {
    for achievement in unlocked {
        println!(
            "Achievement unlocked: {} {} (+{} XP)",
            achievement.icon, achievement.title, achievement.xp_reward
        );
    }
}
