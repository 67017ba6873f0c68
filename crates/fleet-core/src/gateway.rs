//! # Persistence Gateway
//!
//! The storage port that [`Catalog`](crate::Catalog) and
//! [`RentalLedger`](crate::RentalLedger) are built on.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │        Catalog ─────┐                 ┌──── InMemoryGateway (tests)     │
//! │                     ├──► dyn Gateway ─┤                                 │
//! │   RentalLedger ─────┘                 └──── fleet_db::Database (SQLite) │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Ids are assigned by the store on insert and never reused.
//! - `insert_client` fails with [`CoreError::DuplicateKey`] when the email
//!   is already taken, leaving the existing client untouched.
//! - `close_rental` writes all closing fields in one atomic step and only
//!   while the rental is still open.
//!
//! [`CoreError::DuplicateKey`]: crate::CoreError::DuplicateKey

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::types::{
    Car, CarId, Client, ClientId, NewCar, NewClient, NewRental, Rental, RentalClosing,
    RentalFilter, RentalId,
};

/// Durable storage for cars, clients and rentals.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Stores a new car and returns it with its assigned id.
    async fn insert_car(&self, car: &NewCar) -> CoreResult<Car>;

    async fn get_car(&self, id: CarId) -> CoreResult<Option<Car>>;

    /// Returns every car ordered by id.
    async fn list_cars(&self) -> CoreResult<Vec<Car>>;

    /// Stores a new client and returns it with its assigned id.
    async fn insert_client(&self, client: &NewClient) -> CoreResult<Client>;

    async fn get_client(&self, id: ClientId) -> CoreResult<Option<Client>>;

    /// Returns every client ordered by id.
    async fn list_clients(&self) -> CoreResult<Vec<Client>>;

    /// Stores a new open rental and returns it with its assigned id.
    async fn insert_rental(&self, rental: &NewRental) -> CoreResult<Rental>;

    async fn get_rental(&self, id: RentalId) -> CoreResult<Option<Rental>>;

    /// Returns the rentals matching `filter`, ordered by id.
    async fn list_rentals(&self, filter: RentalFilter) -> CoreResult<Vec<Rental>>;

    /// Writes the closing fields if the rental is still open.
    ///
    /// ## Returns
    /// * `Ok(true)` - The rental was open and is now closed
    /// * `Ok(false)` - No open rental with that id (missing or already closed)
    async fn close_rental(&self, id: RentalId, closing: &RentalClosing) -> CoreResult<bool>;
}

/// Shared handle to a gateway, as injected into the components.
pub type SharedGateway = Arc<dyn PersistenceGateway>;
