//! # fleet-cli
//!
//! Console front end for the rental platform. Parses a command line,
//! opens the SQLite database and runs one command against `Catalog` and
//! `RentalLedger`.
//!
//! ## Module Organization
//! ```text
//! fleet_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (flags, env, data dir)
//! │   └── db.rs       ◄─── AppState (Database + Catalog + RentalLedger)
//! ├── commands/
//! │   ├── mod.rs      ◄─── clap definitions, dispatch, output
//! │   ├── car.rs      ◄─── car add / list / rates
//! │   ├── client.rs   ◄─── client register / list
//! │   └── rental.rs   ◄─── rental open / close / show / list
//! └── error.rs        ◄─── CliError with codes and exit statuses
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::Cli;
use error::CliResult;
use fleet_db::DbConfig;
use state::{AppConfig, AppState, DEFAULT_LOG_FILTER};

/// Runs one parsed command line.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Resolve Configuration ────────────────────────────────────────────► │
/// │     • --db flag, FLEET_DB_PATH, or platform data directory              │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • FLEET_LOG, then RUST_LOG, then info,fleet=debug,sqlx=warn         │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  4. Dispatch Command ─────────────────────────────────────────────────► │
/// │     • Result printed to stdout as text or JSON                          │
/// │                                                                         │
/// │  5. Close Pool ───────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::from_env(cli.db.clone())?;

    init_tracing(config.log_filter.as_deref());
    debug!(?config, "Configuration resolved");

    config.ensure_data_dir()?;
    let database = config.database_path.display().to_string();
    info!(path = %database, "Database path determined");

    let state = AppState::open(DbConfig::new(&config.database_path)).await?;
    let result = commands::dispatch(&state, cli.command, cli.json, database).await;
    state.shutdown().await;

    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// ## Log Levels
/// - `FLEET_LOG=debug` - Show debug messages
/// - `FLEET_LOG=fleet_db=trace` - Trace the database layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
fn init_tracing(fleet_log: Option<&str>) {
    let filter = fleet_log
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second initialization (tests calling run twice) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
