//! # Repository Module
//!
//! SQLite repositories for the rental platform.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  PersistenceGateway (gateway.rs)                                       │
//! │       │                                                                 │
//! │       │  db.rentals().close(id, &closing)                              │
//! │       ▼                                                                 │
//! │  RentalRepository                                                      │
//! │  ├── insert(&self, rental)                                             │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self, filter)                                               │
//! │  └── close(&self, id, closing)  ← conditional UPDATE                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CarRepository`](car::CarRepository) - Car rows
//! - [`ClientRepository`](client::ClientRepository) - Client rows, unique email
//! - [`RentalRepository`](rental::RentalRepository) - Rental lifecycle rows

pub mod car;
pub mod client;
pub mod rental;
