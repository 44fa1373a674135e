use std::path::PathBuf;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use learn_core::model::SectionId;
use services::{AppServices, Clock, DEFAULT_SLOT};

mod cli;

#[derive(Parser)]
#[command(name = "learn")]
#[command(about = "Track course progress, XP, levels and achievements")]
#[command(version)]
struct Cli {
    /// SQLite database holding the progress slot
    #[arg(long, global = true, env = "LEARN_DB_URL", default_value = "sqlite:progress.sqlite3")]
    db: String,

    /// TOML course catalog (defaults to the built-in course)
    #[arg(long, global = true, env = "LEARN_CATALOG")]
    catalog: Option<PathBuf>,

    /// Storage slot the progress document lives under
    #[arg(
        long,
        global = true,
        env = "LEARN_SLOT",
        default_value = DEFAULT_SLOT,
        value_parser = NonEmptyStringValueParser::new()
    )]
    slot: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show XP, level, streaks and the next section
    Status,

    /// List course sections with completion and scores
    Sections,

    /// List achievements and which are unlocked
    Achievements,

    /// Record a flashcard round for a section
    Flashcards {
        section: SectionId,
        /// Cards marked as known
        known: u32,
        /// Cards in the round
        total: u32,
    },

    /// Record a section quiz result
    Quiz {
        section: SectionId,
        correct: u32,
        total: u32,
    },

    /// Record the final test result (requires every section completed)
    FinalTest { correct: u32, total: u32 },

    /// Record a single answer for the correct-answer streak
    Answer(cli::learn::AnswerArgs),

    /// Record how long a module took, in seconds
    ModuleTime { seconds: f64 },

    /// Write the progress document to a JSON file
    Export {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Replace progress with a previously exported JSON file
    Import { file: PathBuf },

    /// Delete all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Open + migrate SQLite here so core/services stay free of filesystem setup.
    let db_url = cli::db::normalize_sqlite_url(&cli.db)?;
    cli::db::prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(
        &db_url,
        Clock::default_clock(),
        &cli.slot,
        cli.catalog.as_deref(),
    )
    .await?;
    tracing::debug!(db = %db_url, slot = %cli.slot, "progress store ready");
    let progress = services.progress();

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cli::status::status_command(&progress).await?,
        Commands::Sections => cli::status::sections_command(&progress).await?,
        Commands::Achievements => cli::status::achievements_command(&progress).await?,
        Commands::Flashcards {
            section,
            known,
            total,
        } => cli::learn::flashcards_command(&progress, &section, known, total).await?,
        Commands::Quiz {
            section,
            correct,
            total,
        } => cli::learn::quiz_command(&progress, &section, correct, total).await?,
        Commands::FinalTest { correct, total } => {
            cli::learn::final_test_command(&progress, correct, total).await?;
        }
        Commands::Answer(args) => cli::learn::answer_command(&progress, &args).await?,
        Commands::ModuleTime { seconds } => {
            cli::learn::module_time_command(&progress, seconds).await?;
        }
        Commands::Export { out } => cli::transfer::export_command(&progress, &out).await?,
        Commands::Import { file } => cli::transfer::import_command(&progress, &file).await?,
        Commands::Reset { yes } => cli::transfer::reset_command(&progress, yes).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn empty_slot_is_rejected() {
        assert!(Cli::try_parse_from(["learn", "--slot", "", "status"]).is_err());
    }

    #[test]
    fn slot_flag_selects_the_storage_slot() {
        let cli = Cli::try_parse_from(["learn", "--slot", "work", "sections"]).unwrap();
        assert_eq!(cli.slot, "work");
        assert!(matches!(cli.command, Some(Commands::Sections)));
    }
}
