//! # fleet-db: SQLite Storage for the Rental Platform
//!
//! This crate stores cars, clients and rentals in SQLite through sqlx and
//! implements [`fleet_core::PersistenceGateway`] for [`Database`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fleet Rental Data Flow                           │
//! │                                                                         │
//! │  Catalog / RentalLedger (fleet-core)                                   │
//! │       │  Arc<dyn PersistenceGateway>                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     fleet-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CarRepo       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ClientRepo    │    │ 001_init.sql │  │   │
//! │  │   │ gateway.rs    │    │ RentalRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   $FLEET_DB_PATH or <data dir>/fleet.db                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (car, client, rental)
//! - [`gateway`] - `PersistenceGateway` for `Database`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_core::{Catalog, RentalLedger, SharedGateway};
//! use fleet_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("fleet.db")).await?;
//! let gateway: SharedGateway = Arc::new(db);
//! let catalog = Catalog::new(gateway.clone());
//! let ledger = RentalLedger::new(gateway, catalog.clone());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::car::CarRepository;
pub use repository::client::ClientRepository;
pub use repository::rental::RentalRepository;
