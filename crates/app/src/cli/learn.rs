//! Commands that record learning activity

use anyhow::{Result, bail};
use clap::Args;
use learn_core::model::{Percent, SectionId};
use services::ProgressService;

use super::{print_unlocked, print_xp_gain};

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct AnswerArgs {
    /// The answer was right
    #[arg(long)]
    correct: bool,
    /// The answer was wrong
    #[arg(long)]
    wrong: bool,
}

/// Record a flashcard round
pub async fn flashcards_command(
    progress: &ProgressService,
    section: &SectionId,
    known: u32,
    total: u32,
) -> Result<()> {
    let score = Percent::from_ratio(known, total)?;
    let mut record = progress.load().await;
    let outcome = progress
        .finish_flashcards(&mut record, section, score)
        .await?;

    println!("Flashcards {section}: {}", outcome.score);
    match outcome.xp {
        Some(gain) => print_xp_gain(&gain),
        None => println!("Not passed yet, no XP this round."),
    }

    Ok(())
}

/// Record a section quiz
pub async fn quiz_command(
    progress: &ProgressService,
    section: &SectionId,
    correct: u32,
    total: u32,
) -> Result<()> {
    let score = Percent::from_ratio(correct, total)?;
    let mut record = progress.load().await;
    let outcome = progress
        .finish_section_quiz(&mut record, section, score)
        .await?;

    println!("Quiz {section}: {score}");
    print_xp_gain(&outcome.xp);
    if outcome.newly_completed {
        println!("Section completed.");
    }
    print_unlocked(&outcome.unlocked);

    Ok(())
}

/// Record the final test; only available once every section is completed
pub async fn final_test_command(progress: &ProgressService, correct: u32, total: u32) -> Result<()> {
    let score = Percent::from_ratio(correct, total)?;
    let mut record = progress.load().await;
    if !progress.catalog().all_sections_completed(&record) {
        bail!("the final test unlocks once every section is completed");
    }

    let outcome = progress.finish_final_test(&mut record, score).await;

    println!("Final test: {score}");
    print_xp_gain(&outcome.xp);
    print_unlocked(&outcome.unlocked);

    Ok(())
}

/// Record one answer and check streak achievements
pub async fn answer_command(progress: &ProgressService, args: &AnswerArgs) -> Result<()> {
    let correct = args.correct && !args.wrong;
    let mut record = progress.load().await;
    progress.record_answer(&mut record, correct).await;
    let unlocked = progress.check_achievements(&mut record).await;

    println!(
        "Correct streak: {} (best {})",
        record.correct_streak(),
        record.max_correct_streak()
    );
    print_unlocked(&unlocked);

    Ok(())
}

/// Record a module duration and check speed achievements
pub async fn module_time_command(progress: &ProgressService, seconds: f64) -> Result<()> {
    let mut record = progress.load().await;
    let is_best = progress.record_module_time(&mut record, seconds).await?;
    let unlocked = progress.check_achievements(&mut record).await;

    if is_best {
        println!("New best module time: {seconds:.0}s");
    } else if let Some(best) = record.fastest_module_time() {
        println!("Best module time is still {best:.0}s");
    }
    print_unlocked(&unlocked);

    Ok(())
}
