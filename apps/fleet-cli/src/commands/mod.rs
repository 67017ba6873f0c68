//! # Commands Module
//!
//! The `fleet` command line and the handlers behind it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (argument parsing, dispatch, output)
//! ├── car.rs      ◄─── car add / list / rates
//! ├── client.rs   ◄─── client register / list
//! └── rental.rs   ◄─── rental open / close / show / list
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ fleet rental close 1 --km 20 --end 2024-01-01T12:00                 │
//! │         │                                                               │
//! │         │ clap (derive)                                                 │
//! │         ▼                                                               │
//! │  Command::Rental(RentalCommand::Close { id, km, end })                  │
//! │         │                                                               │
//! │         │ dispatch(&AppState, ..)                                       │
//! │         ▼                                                               │
//! │  rental::close(&state, ..) -> CliResult<RentalClosed>                   │
//! │         │                                                               │
//! │         │ emit(report, json)                                            │
//! │         ▼                                                               │
//! │  stdout: "Rental 1 closed. Total amount: 30.00"  or  JSON               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod car;
pub mod client;
pub mod rental;

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::error::CliResult;
use crate::state::AppState;
use fleet_core::RentalFilter;

// =============================================================================
// Argument Parsing
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "fleet", version, about = "Vehicle rental fleet management")]
pub struct Cli {
    /// SQLite database file (default: $FLEET_DB_PATH or the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database and apply migrations
    Init,
    /// Manage the car catalog
    #[command(subcommand)]
    Car(CarCommand),
    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),
    /// Open, close and inspect rentals
    #[command(subcommand)]
    Rental(RentalCommand),
}

#[derive(Debug, Subcommand)]
pub enum CarCommand {
    /// Register a car with its rates
    Add {
        #[arg(long)]
        model: String,
        #[arg(long, allow_negative_numbers = true)]
        hourly_rate: f64,
        #[arg(long, allow_negative_numbers = true)]
        per_km_rate: f64,
    },
    /// List all cars
    List,
    /// Show a car's rates
    Rates { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Register a client
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
    },
    /// List all clients
    List,
}

#[derive(Debug, Subcommand)]
pub enum RentalCommand {
    /// Hand a car over to a client
    Open {
        #[arg(long)]
        car: i64,
        #[arg(long)]
        client: i64,
        /// Start time (RFC 3339 or YYYY-MM-DDTHH:MM[:SS] in UTC; default now)
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<DateTime<Utc>>,
    },
    /// Take a car back and bill the rental
    Close {
        id: i64,
        /// Kilometers driven during the rental
        #[arg(long, allow_negative_numbers = true)]
        km: f64,
        /// End time (RFC 3339 or YYYY-MM-DDTHH:MM[:SS] in UTC; default now)
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<DateTime<Utc>>,
    },
    /// Show one rental
    Show { id: i64 },
    /// List rentals
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Open,
    Closed,
}

impl From<StatusArg> for RentalFilter {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Open => RentalFilter::Open,
            StatusArg::Closed => RentalFilter::Closed,
        }
    }
}

/// Maps the optional `--status` flag onto a listing filter; no flag lists all.
pub fn rental_filter(status: Option<StatusArg>) -> RentalFilter {
    status.map_or(RentalFilter::All, RentalFilter::from)
}

/// Parses a timestamp argument.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00+02:00`) or a naive
/// `YYYY-MM-DDTHH:MM[:SS]`, which is read as UTC. A space may stand in
/// for the `T`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!("invalid timestamp '{raw}': expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]")
        })
}

// =============================================================================
// Output
// =============================================================================

/// A command result that can be printed as text or JSON.
pub trait Render: Serialize {
    fn text(&self) -> String;
}

/// Renders a report for stdout.
pub fn render<R: Render>(report: &R, json: bool) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.text())
    }
}

fn emit<R: Render>(report: &R, json: bool) -> CliResult<()> {
    println!("{}", render(report, json)?);
    Ok(())
}

/// Result of `fleet init`.
#[derive(Debug, Serialize)]
pub struct Initialized {
    pub database: String,
    pub migrations_applied: usize,
    pub migrations_total: usize,
}

impl Render for Initialized {
    fn text(&self) -> String {
        "Fleet rental platform initialized.".to_string()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one parsed command against the application state and prints its
/// result.
pub async fn dispatch(
    state: &AppState,
    command: Command,
    json: bool,
    database: String,
) -> CliResult<()> {
    match command {
        Command::Init => {
            let (total, applied) = state.migration_status().await?;
            let report = Initialized {
                database,
                migrations_applied: applied,
                migrations_total: total,
            };
            emit(&report, json)
        }

        Command::Car(CarCommand::Add {
            model,
            hourly_rate,
            per_km_rate,
        }) => emit(&car::add(state, &model, hourly_rate, per_km_rate).await?, json),
        Command::Car(CarCommand::List) => emit(&car::list(state).await?, json),
        Command::Car(CarCommand::Rates { id }) => emit(&car::rates(state, id).await?, json),

        Command::Client(ClientCommand::Register { full_name, email }) => {
            emit(&client::register(state, &full_name, &email).await?, json)
        }
        Command::Client(ClientCommand::List) => emit(&client::list(state).await?, json),

        Command::Rental(RentalCommand::Open { car, client, start }) => {
            let start = start.unwrap_or_else(Utc::now);
            emit(&rental::open(state, car, client, start).await?, json)
        }
        Command::Rental(RentalCommand::Close { id, km, end }) => {
            let end = end.unwrap_or_else(Utc::now);
            emit(&rental::close(state, id, end, km).await?, json)
        }
        Command::Rental(RentalCommand::Show { id }) => emit(&rental::show(state, id).await?, json),
        Command::Rental(RentalCommand::List { status }) => {
            emit(&rental::list(state, rental_filter(status)).await?, json)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
