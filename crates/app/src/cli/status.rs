//! Read-only views of the current progress

use anyhow::Result;
use services::ProgressService;

/// Show XP, level, streaks and what to study next
pub async fn status_command(progress: &ProgressService) -> Result<()> {
    let record = progress.load().await;
    let catalog = progress.catalog();
    let level = record.level_progress();

    println!(
        "{} Level {}: {}",
        level.level.icon, level.level.number, level.level.title
    );
    match (level.next, level.xp_to_next()) {
        (Some(next), Some(remaining)) => println!(
            "  {} XP ({:.0}% to {}, {} XP to go)",
            record.total_xp(),
            level.percentage,
            next.title,
            remaining
        ),
        _ => println!("  {} XP (max level)", record.total_xp()),
    }

    println!(
        "  Sections: {}/{}",
        record.completed_sections().len(),
        catalog.sections().len()
    );
    println!(
        "  Achievements: {}/{}",
        record.unlocked_achievements().len(),
        catalog.achievements().len()
    );
    if let Some(latest) = record
        .unlocked_achievements()
        .last()
        .and_then(|id| catalog.achievement(id))
    {
        println!("  Latest: {} {}", latest.icon, latest.title);
    }
    println!("  Login streak: {} day(s)", record.login_streak());
    println!(
        "  Correct streak: {} (best {})",
        record.correct_streak(),
        record.max_correct_streak()
    );
    if let Some(seconds) = record.fastest_module_time() {
        println!("  Fastest module: {seconds:.0}s");
    }
    if let Some(score) = record.final_test_score() {
        println!("  Final test: {score}");
    }
    if !record.flashcard_progress().is_empty() {
        println!("  Flashcard sets tracked: {}", record.flashcard_progress().len());
    }

    match catalog.next_section(&record) {
        Some(section) => println!("\nNext up: {} {} ({})", section.icon, section.title, section.id),
        None if record.final_test_score().is_none() => {
            println!("\nAll sections done. The final test is unlocked.");
        }
        None => println!("\nCourse complete."),
    }

    Ok(())
}

/// List sections in course order
pub async fn sections_command(progress: &ProgressService) -> Result<()> {
    let record = progress.load().await;

    for section in progress.catalog().sections() {
        let marker = if record.is_section_completed(&section.id) {
            "x"
        } else {
            " "
        };
        let score = record
            .section_score(&section.id)
            .map(|score| format!(" - {score}"))
            .unwrap_or_default();
        println!(
            "  [{marker}] {:<12} {} ({} XP){score}",
            section.id.as_str(),
            section.title,
            section.xp_reward
        );
    }

    Ok(())
}

/// List achievements, unlocked first marked
pub async fn achievements_command(progress: &ProgressService) -> Result<()> {
    let record = progress.load().await;

    for achievement in progress.catalog().achievements() {
        let marker = if record.is_unlocked(&achievement.id) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{marker}] {} {} - {} (+{} XP)",
            achievement.icon, achievement.title, achievement.description, achievement.xp_reward
        );
    }

    Ok(())
}
