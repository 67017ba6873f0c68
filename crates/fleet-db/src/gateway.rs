//! # SQLite Gateway
//!
//! Plugs [`Database`] into the domain's [`PersistenceGateway`] port so
//! `Catalog` and `RentalLedger` can run against SQLite.
//!
//! Every method forwards to a repository and folds `DbError` into
//! `CoreError` on the way out.

use async_trait::async_trait;
use fleet_core::{
    Car, CarId, Client, ClientId, CoreResult, NewCar, NewClient, NewRental, PersistenceGateway,
    Rental, RentalClosing, RentalFilter, RentalId,
};

use crate::pool::Database;

#[async_trait]
impl PersistenceGateway for Database {
    async fn insert_car(&self, car: &NewCar) -> CoreResult<Car> {
        Ok(self.cars().insert(car).await?)
    }

    async fn get_car(&self, id: CarId) -> CoreResult<Option<Car>> {
        Ok(self.cars().get_by_id(id).await?)
    }

    async fn list_cars(&self) -> CoreResult<Vec<Car>> {
        Ok(self.cars().list().await?)
    }

    async fn insert_client(&self, client: &NewClient) -> CoreResult<Client> {
        Ok(self.clients().insert(client).await?)
    }

    async fn get_client(&self, id: ClientId) -> CoreResult<Option<Client>> {
        Ok(self.clients().get_by_id(id).await?)
    }

    async fn list_clients(&self) -> CoreResult<Vec<Client>> {
        Ok(self.clients().list().await?)
    }

    async fn insert_rental(&self, rental: &NewRental) -> CoreResult<Rental> {
        Ok(self.rentals().insert(rental).await?)
    }

    async fn get_rental(&self, id: RentalId) -> CoreResult<Option<Rental>> {
        Ok(self.rentals().get_by_id(id).await?)
    }

    async fn list_rentals(&self, filter: RentalFilter) -> CoreResult<Vec<Rental>> {
        Ok(self.rentals().list(filter).await?)
    }

    async fn close_rental(&self, id: RentalId, closing: &RentalClosing) -> CoreResult<bool> {
        Ok(self.rentals().close(id, closing).await?)
    }
}
