//! # fleet-core: Rental Lifecycle and Billing
//!
//! This crate is the **heart** of the rental platform. It holds the rules
//! for registering cars and clients, opening and closing rentals, and
//! computing what a client owes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fleet Rental Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fleet-cli (console)                          │   │
//! │  │   car add ─ client register ─ rental open ─ rental close        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fleet-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌──────────┐  ┌──────────┐  │   │
//! │  │   │  Catalog  │  │ RentalLedger │  │ billing  │  │validation│  │   │
//! │  │   │ cars      │  │ open / close │  │ RateCard │  │  rules   │  │   │
//! │  │   │ clients   │  │ total_amount │  │ hours    │  │          │  │   │
//! │  │   └─────┬─────┘  └──────┬───────┘  └──────────┘  └──────────┘  │   │
//! │  │         └───────┬───────┘                                      │   │
//! │  │                 ▼                                               │   │
//! │  │        PersistenceGateway (trait)                               │   │
//! │  └─────────────────┬───────────────────────────────────────────────┘   │
//! │                    │                                                    │
//! │  ┌─────────────────▼───────────────┐   ┌──────────────────────────┐    │
//! │  │  fleet-db (SQLite, sqlx)        │   │  InMemoryGateway (tests) │    │
//! │  └─────────────────────────────────┘   └──────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Car, Client, Rental, ids)
//! - [`billing`] - Rate card and elapsed-time arithmetic
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//! - [`gateway`] - The storage port
//! - [`memory`] - In-memory gateway
//! - [`catalog`] / [`ledger`] - The two components
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use fleet_core::{Catalog, InMemoryGateway, RentalLedger, SharedGateway};
//!
//! # tokio_test_block(async {
//! let gateway: SharedGateway = Arc::new(InMemoryGateway::new());
//! let catalog = Catalog::new(gateway.clone());
//! let ledger = RentalLedger::new(gateway, catalog.clone());
//!
//! let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
//! let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//!
//! let rental = ledger.open(car, ana, start).await.unwrap();
//! assert_eq!(ledger.close(rental, end, 20.0).await.unwrap(), 30.0);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod memory;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::RateCard;
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use gateway::{PersistenceGateway, SharedGateway};
pub use ledger::RentalLedger;
pub use memory::InMemoryGateway;
pub use types::*;
