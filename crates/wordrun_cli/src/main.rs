//! Command line front-end for the WordRun journal.
//!
//! # Responsibility
//! - Drive the same core use cases the mobile UI calls.
//! - Keep output line-oriented so it stays scriptable.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{stdout, Write};
use std::path::PathBuf;
use wordrun_core::db::open_db;
use wordrun_core::{
    init_logging, AppConfig, Clock, DailyLogRepository, DailyLogService, DailyRun, DateKey,
    KvDailyLogRepository, RolloverOutcome, SqliteKeyValueStore, SystemClock,
};

/// Daily vocabulary journal.
#[derive(Parser)]
#[command(name = "wordrun", version)]
struct Cli {
    /// Journal database (defaults to $WORDRUN_DB_PATH or a temp file)
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files (defaults to $WORDRUN_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's words, archiving yesterday's first
    Today,
    /// Record a word for today
    Add {
        word: String,
        #[arg(default_value = "")]
        phonetic: String,
    },
    /// Remove today's word at a 0-based position
    Delete { index: usize },
    /// List archived days, newest first
    History,
    /// Show the words of one archived day (YYYY-MM-DD)
    Day { date: DateKey },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(log_dir) = args.log_dir {
        config.log_dir = Some(log_dir);
    }

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory {:?} is not valid UTF-8", log_dir))?;
        init_logging(&config.log_level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open journal {:?}", config.db_path))?;
    let service = DailyLogService::new(
        KvDailyLogRepository::new(SqliteKeyValueStore::new(&conn)),
        SystemClock,
    );
    let mut out = stdout().lock();
    run(&service, args.command, &mut out)
}

fn run<R, C, W>(service: &DailyLogService<R, C>, command: Command, out: &mut W) -> Result<()>
where
    R: DailyLogRepository,
    C: Clock,
    W: Write,
{
    match command {
        Command::Today => {
            if let RolloverOutcome::Archived {
                date, entry_count, ..
            } = service.roll_over()
            {
                writeln!(
                    out,
                    "Archived {} word{} from {}.",
                    entry_count,
                    plural(entry_count),
                    date
                )?;
            }
            print_run(out, &service.current_run())?;
        }
        Command::Add { word, phonetic } => {
            let run = service.append_entry(word, phonetic)?;
            print_run(out, &run)?;
        }
        Command::Delete { index } => {
            let run = service.delete_entry(index)?;
            print_run(out, &run)?;
        }
        Command::History => {
            let summaries = service.history_summaries();
            if summaries.is_empty() {
                writeln!(out, "No archived days.")?;
            }
            for summary in summaries {
                writeln!(
                    out,
                    "{:<8} {}  {} word{}",
                    summary.label,
                    summary.date,
                    summary.entry_count,
                    plural(summary.entry_count)
                )?;
            }
        }
        Command::Day { date } => {
            let day = service
                .history_day(date)
                .ok_or_else(|| anyhow!("No archived day {}.", date))?;
            writeln!(out, "{}", day.date)?;
            for (i, entry) in day.entries.iter().enumerate() {
                writeln!(out, "{:>3}. {}  {}", i, entry.word, entry.phonetic)?;
            }
        }
    }
    Ok(())
}

fn print_run<W: Write>(out: &mut W, run: &DailyRun) -> Result<()> {
    writeln!(
        out,
        "{}: {} word{}",
        run.date,
        run.len(),
        plural(run.len())
    )?;
    for (i, entry) in run.entries.iter().enumerate() {
        writeln!(out, "{:>3}. {}  {}", i, entry.word, entry.phonetic)?;
    }
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
