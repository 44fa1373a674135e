//! Export, import and reset

use std::path::Path;

use anyhow::{Context, Result, bail};
use services::ProgressService;

pub async fn export_command(progress: &ProgressService, out: &Path) -> Result<()> {
    let record = progress.load().await;
    let path = progress
        .export_to_dir(&record, out)
        .await
        .with_context(|| format!("exporting into {}", out.display()))?;
    println!("Exported progress to {}", path.display());
    Ok(())
}

/// Replace the stored progress with an exported document.
///
/// A rejected file leaves the existing progress untouched.
pub async fn import_command(progress: &ProgressService, file: &Path) -> Result<()> {
    let record = progress
        .import_file(file)
        .await
        .with_context(|| format!("importing {}", file.display()))?;
    println!(
        "Imported progress: {} XP, {} section(s), {} achievement(s)",
        record.total_xp(),
        record.completed_sections().len(),
        record.unlocked_achievements().len()
    );
    Ok(())
}

pub async fn reset_command(progress: &ProgressService, yes: bool) -> Result<()> {
    if !yes {
        bail!("reset deletes all progress; pass --yes to confirm");
    }
    progress.reset().await;
    println!("Progress reset.");
    Ok(())
}
