//! Command-line shell for the advent calendar.
//!
//! # Responsibility
//! - Render computed tile states, day content and progress as text.
//! - Keep all calendar rules in `advent_core`; this binary only wires
//!   configuration, storage and the feed together.

use advent_core::db::open_db;
use advent_core::{
    init_logging, to_canonical, to_display_form, AdventConfig, Clock, ConfigOverrides,
    ContentFeed, DayContent, FixedClock, OpenedDayStore, RevealEngine, SqliteKeyValueStore,
    SystemClock,
};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use log::warn;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "advent", version, about = "Daily reveal calendar")]
struct Cli {
    /// Feed URL (overrides ADVENT_FEED_URL)
    #[arg(long, global = true)]
    feed_url: Option<String>,

    /// Local feed file (overrides ADVENT_FEED_FILE)
    #[arg(long, global = true)]
    feed_file: Option<PathBuf>,

    /// SQLite file holding opened days (overrides ADVENT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute log directory (overrides ADVENT_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides ADVENT_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Evaluate at this local time instead of now, e.g. 2024-12-05T09:00
    #[arg(long, global = true, value_parser = parse_local_time)]
    at: Option<NaiveDateTime>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every day with its tile state
    Grid,
    /// Open one day and print its content
    Open { day: u32 },
    /// Print how many days are unlocked
    Progress,
    /// Resolve an identity reference to its hex and npub forms
    Identity { reference: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AdventConfig::from_env().with_overrides(ConfigOverrides {
        feed_url: cli.feed_url.clone(),
        feed_file: cli.feed_file.clone(),
        db_path: cli.db.clone(),
        log_dir: cli.log_dir.clone(),
        log_level: cli.log_level.clone(),
    });

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &AdventConfig) -> Result<(), Box<dyn Error>> {
    if let Command::Identity { reference } = &cli.command {
        print_identity(reference);
        return Ok(());
    }

    let now = match cli.at {
        Some(at) => FixedClock(at).now(),
        None => SystemClock.now(),
    };

    let source = config.feed_source()?;
    let feed = ContentFeed::load(&*source)
        .await
        .map_err(|err| format!("could not load calendar: {err}"))?;

    let conn = open_db(&config.db_path)?;
    let opened = OpenedDayStore::new(SqliteKeyValueStore::new(&conn));
    let mut engine = RevealEngine::with_feed(feed, opened);

    match &cli.command {
        Command::Grid => {
            for tile in engine.tiles(now) {
                let title = engine
                    .days()
                    .iter()
                    .find(|content| content.day == tile.day)
                    .filter(|_| tile.state.is_clickable())
                    .map_or("", |content| content.title.as_str());
                println!("{:>2}  {:<6}  {title}", tile.day, tile.state);
            }
            println!();
            println!("{}", engine.progress_label(now));
        }
        Command::Open { day } => {
            let state = engine.tile_state_for(*day, now)?;
            if !state.is_clickable() {
                return Err(format!("day {day} is still locked").into());
            }
            let person = engine.person_card(*day)?;
            let content = engine.on_day_opened(*day)?;
            print_day(content);
            if let Some(card) = person {
                println!();
                println!("Person to follow: {}", card.display_name());
                println!("  {}  ({})", card.short_display_key(), card.follow_uri());
            }
        }
        Command::Progress => println!("{}", engine.progress_label(now)),
        Command::Identity { .. } => {}
    }
    Ok(())
}

fn print_day(content: &DayContent) {
    println!("{}", content.title);
    println!("Day {} - {}", content.day, content.formatted_unlock_date());
    println!();
    println!("{}", content.learn);
    if let Some(app) = &content.app {
        println!();
        println!("App of the day: {}", app.display_name(None));
        let summary = app.display_summary(None);
        if !summary.is_empty() {
            println!("  {summary}");
        }
        println!("  {}", app.url);
    }
}

fn print_identity(reference: &str) {
    for line in identity_lines(reference) {
        println!("{line}");
    }
}

fn identity_lines(reference: &str) -> [String; 2] {
    let hex = match to_canonical(reference) {
        Ok(hex) => hex,
        Err(err) => {
            warn!("event=identity_decode module=cli status=recovered error={err}");
            return [
                format!("hex:  {reference} (unresolved: {err})"),
                format!("npub: {reference}"),
            ];
        }
    };
    let npub = to_display_form(&hex).unwrap_or_else(|err| {
        warn!("event=identity_encode module=cli status=recovered error={err}");
        reference.to_string()
    });
    [format!("hex:  {hex}"), format!("npub: {npub}")]
}

fn parse_local_time(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("expected YYYY-MM-DD[THH:MM[:SS]], got `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::{identity_lines, parse_local_time, Cli};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_local_time_accepts_date_and_datetime() {
        assert_eq!(
            parse_local_time("2024-12-05").unwrap().to_string(),
            "2024-12-05 00:00:00"
        );
        assert_eq!(
            parse_local_time("2024-12-05T09:30").unwrap().to_string(),
            "2024-12-05 09:30:00"
        );
        assert!(parse_local_time("yesterday").is_err());
    }

    #[test]
    fn identity_lines_show_hex_and_npub_for_key_reference() {
        let npub = "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6";
        let hex = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

        assert_eq!(
            identity_lines(&format!("nostr:{npub}")),
            [format!("hex:  {hex}"), format!("npub: {npub}")]
        );
        assert_eq!(identity_lines(hex)[1], format!("npub: {npub}"));
    }

    #[test]
    fn identity_lines_echo_unresolvable_reference() {
        let broken = "npub1zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz";
        let [hex_line, npub_line] = identity_lines(broken);

        assert!(hex_line.starts_with(&format!("hex:  {broken} (unresolved: ")));
        assert_eq!(npub_line, format!("npub: {broken}"));
    }
}
