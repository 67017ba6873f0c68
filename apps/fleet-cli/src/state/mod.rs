//! # State Module
//!
//! What a command needs to run: resolved configuration and the wired-up
//! domain components.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  --db flag ──┐                                                          │
//! │  FLEET_DB_PATH ─┼──► AppConfig ──► DbConfig ──► Database (SQLite pool) │
//! │  ProjectDirs ──┘                                    │                   │
//! │                                                     │ Arc<dyn Gateway>  │
//! │                                          ┌──────────┴─────────┐         │
//! │                                          ▼                    ▼         │
//! │                                     ┌─────────┐      ┌──────────────┐   │
//! │                                     │ Catalog │◄─────│ RentalLedger │   │
//! │                                     └─────────┘      └──────────────┘   │
//! │                                                                         │
//! │  AppState owns all three for the lifetime of one command.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{AppConfig, ConfigError, DEFAULT_LOG_FILTER};
pub use db::AppState;
