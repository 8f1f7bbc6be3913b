//! `ftrips` - CLI for fieldtrips
//!
//! This binary wires the trip store to a local database and renders the
//! derived views (list, report, calendar, map, export) as terminal output.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use fieldtrips::cli::{
    CalendarCommand, Cli, Command, ConfigCommand, ExportCommand, ExportFormat, ListCommand,
    MapCommand, OutputFormat, ReportCommand,
};
use fieldtrips::report::{bar_scale, ReportSummary, MONTH_LABELS};
use fieldtrips::{
    calendar, export, filter, init_logging, Config, Error, EventBus, SqliteBackend, TripStore,
};

/// Character width of the widest report bar.
const BAR_WIDTH: usize = 24;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd.draft()),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd.id),
        Command::Report(cmd) => handle_report(&config, &cmd),
        Command::Calendar(cmd) => handle_calendar(&config, &cmd),
        Command::Map(cmd) => handle_map(&config, &cmd),
        Command::Export(cmd) => handle_export(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

/// Open the store over the configured database.
fn open_store(config: &Config) -> anyhow::Result<TripStore> {
    let backend = SqliteBackend::open(config.database_path())
        .with_context(|| format!("cannot open {}", config.database_path().display()))?;
    Ok(TripStore::new(Arc::new(backend), Arc::new(EventBus::new())))
}

fn handle_add(config: &Config, draft: &fieldtrips::TripDraft) -> anyhow::Result<()> {
    let store = open_store(config)?;

    match store.create(draft) {
        Ok(record) => {
            println!(
                "Recorded trip {}: {} {} [{}]",
                record.id,
                record.date_string(),
                record.direction,
                record.teams_label()
            );
            Ok(())
        }
        Err(err) => reject_draft(&err),
    }
}

fn handle_edit(config: &Config, cmd: &fieldtrips::cli::EditCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let record = store
        .get(&cmd.id)
        .with_context(|| format!("no trip with id {}", cmd.id))?;

    let mut draft = fieldtrips::TripDraft::from_record(&record);
    cmd.apply_to(&mut draft);

    match store.update(&cmd.id, &draft) {
        Ok(true) => {
            println!("Updated trip {}", cmd.id);
            Ok(())
        }
        Ok(false) => anyhow::bail!("no trip with id {}", cmd.id),
        Err(err) => reject_draft(&err),
    }
}

fn handle_delete(config: &Config, id: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if store.delete(id)? {
        println!("Deleted trip {id}");
    } else {
        println!("No trip with id {id}");
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let trips = filter::apply(&store.load(), &cmd.query());

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trips)?),
        OutputFormat::Table => {
            if trips.is_empty() {
                println!("No trips match.");
                return Ok(());
            }
            println!(
                "{:<20} {:<12} {:<18} {:<16} {}",
                "ID", "DATE", "DIRECTION", "TEAMS", "PARTICIPANTS"
            );
            for trip in &trips {
                println!(
                    "{:<20} {:<12} {:<18} {:<16} {}",
                    trip.id,
                    trip.date_string(),
                    trip.direction,
                    trip.teams_label(),
                    trip.participants_label()
                );
            }
            println!("{} trip(s)", trips.len());
        }
    }
    Ok(())
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let today = Local::now().date_naive();
    let year = cmd.year.unwrap_or_else(|| today.year());
    let month = cmd.month.unwrap_or_else(|| today.month());
    anyhow::ensure!((1..=12).contains(&month), "month must be 1-12");

    let summary = ReportSummary::for_month(
        &store.load(),
        year,
        month,
        config.report.recent_limit,
    );

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Field trips report: {year}-{month:02}");
    println!();
    println!("Total trips:         {}", summary.total_this_month);
    println!("Unique participants: {}", summary.unique_participants);
    println!("Unique directions:   {}", summary.unique_directions);

    println!();
    println!("Trips per month ({year})");
    let per_month = summary.per_month;
    for (label, &count) in MONTH_LABELS.iter().zip(per_month.iter()) {
        println!("  {label} {} {count}", bar(count, &per_month));
    }

    println!();
    println!("Trips per team ({year}-{month:02})");
    if summary.per_team.is_empty() {
        println!("  No data yet");
    } else {
        let counts: Vec<usize> = summary.per_team.iter().map(|entry| entry.count).collect();
        for entry in &summary.per_team {
            println!("  {:<5} {} {}", entry.team, bar(entry.count, &counts), entry.count);
        }
    }

    println!();
    println!("Recent trips");
    if summary.recent.is_empty() {
        println!("  No trips this month");
    } else {
        for trip in &summary.recent {
            println!(
                "  {}  {:<18} {:<16} {}",
                trip.date_string(),
                trip.direction,
                trip.teams_label(),
                trip.participants_label()
            );
        }
    }

    Ok(())
}

/// A terminal bar whose width scales against the largest sibling value.
fn bar(value: usize, siblings: &[usize]) -> String {
    let percent = bar_scale(value, siblings);
    let filled = (percent / 100.0 * BAR_WIDTH as f64).round() as usize;
    format!("{:<width$}", "#".repeat(filled), width = BAR_WIDTH)
}

fn handle_calendar(config: &Config, cmd: &CalendarCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let (year, month) = match cmd.month.as_deref() {
        Some(raw) => parse_year_month(raw)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let records = store.load();
    if cmd.json {
        let events = calendar::month_events(&records, year, month);
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let days = calendar::events_by_day(&records, year, month);
    println!("{} {year}", calendar::MONTH_NAMES[(month - 1) as usize]);
    if days.is_empty() {
        println!("  No trips this month");
        return Ok(());
    }
    for (day, events) in &days {
        for event in events {
            println!(
                "  {day:>2}  {:<18} {:<16} {}",
                event.trip.direction,
                event.trip.teams_label(),
                event.trip.participants_label()
            );
        }
    }
    Ok(())
}

fn handle_map(config: &Config, cmd: &MapCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let records = store.load();
    let pins = config.gazetteer().resolve_trips(&records);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&pins)?);
        return Ok(());
    }

    for pin in &pins {
        println!(
            "{:>9.4},{:>9.4}  {}  {:<18} {}",
            pin.coordinates.lat,
            pin.coordinates.lng,
            pin.trip.date_string(),
            pin.trip.direction,
            pin.trip.participants_label()
        );
    }
    let unresolved = records.len() - pins.len();
    if unresolved > 0 {
        println!("({unresolved} trip(s) without a known coordinate omitted)");
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let trips = filter::apply(&store.load(), &cmd.query());

    match cmd.format {
        ExportFormat::Csv => export::write_csv(&trips, &cmd.out)?,
        ExportFormat::Json => export::write_json(&trips, &cmd.out)?,
    }
    println!("Exported {} trip(s) to {}", trips.len(), cmd.out.display());
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("database_path: {}", config.database_path().display());
                println!("report.recent_limit: {}", config.report.recent_limit);
                println!("map.locations: {} extra entries", config.map.locations.len());
            }
        }
        ConfigCommand::Path => println!("{}", Config::default_config_path().display()),
        ConfigCommand::Validate { file } => {
            let checked = Config::load_from(file.clone())?;
            checked.validate()?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

/// Parse a `YYYY-MM` month label.
fn parse_year_month(raw: &str) -> anyhow::Result<(i32, u32)> {
    let first_day = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM, got '{raw}'"))?;
    Ok((first_day.year(), first_day.month()))
}

/// Print a rejected draft's field messages and fail the command.
fn reject_draft(err: &Error) -> anyhow::Result<()> {
    let Some(report) = err.validation_report() else {
        anyhow::bail!("{err}");
    };
    for (field, message) in report.iter() {
        eprintln!("{field}: {message}");
    }
    anyhow::bail!("trip rejected, fix the fields above")
}
