//! # Catalog
//!
//! Owns the master data: cars and clients.
//!
//! ```text
//! add_car(model, hourly, per_km) ──► validate ──► gateway.insert_car ──► CarId
//! register_client(name, email)   ──► validate ──► gateway.insert_client ──► ClientId
//!                                                   └── DuplicateKey on email
//! get_car_rates(car_id)          ──► gateway.get_car ──► RateCard | NotFound
//! ```

use crate::billing::RateCard;
use crate::error::{CoreError, CoreResult};
use crate::gateway::SharedGateway;
use crate::types::{Car, CarId, Client, ClientId, NewCar, NewClient};
use crate::validation::{validate_email, validate_full_name, validate_model};

/// Creates and looks up cars and clients.
#[derive(Clone)]
pub struct Catalog {
    gateway: SharedGateway,
}

impl Catalog {
    pub fn new(gateway: SharedGateway) -> Self {
        Catalog { gateway }
    }

    /// Registers a car and returns its new id.
    ///
    /// ## Errors
    /// * `Validation` - empty model, negative or non-finite rate
    ///
    /// Nothing is written when validation fails.
    pub async fn add_car(
        &self,
        model: &str,
        hourly_rate: f64,
        per_km_rate: f64,
    ) -> CoreResult<CarId> {
        let model = validate_model(model)?;
        RateCard::new(hourly_rate, per_km_rate).validate()?;

        let car = self
            .gateway
            .insert_car(&NewCar {
                model,
                hourly_rate,
                per_km_rate,
            })
            .await?;

        Ok(car.id)
    }

    /// Registers a client and returns the new id.
    ///
    /// ## Errors
    /// * `Validation` - empty name or email
    /// * `DuplicateKey` - email already registered (existing client unchanged)
    pub async fn register_client(&self, full_name: &str, email: &str) -> CoreResult<ClientId> {
        let full_name = validate_full_name(full_name)?;
        let email = validate_email(email)?;

        let client = self
            .gateway
            .insert_client(&NewClient { full_name, email })
            .await?;

        Ok(client.id)
    }

    /// Returns the car's current billing rates.
    pub async fn get_car_rates(&self, car_id: CarId) -> CoreResult<RateCard> {
        Ok(self.get_car(car_id).await?.rates())
    }

    pub async fn get_car(&self, car_id: CarId) -> CoreResult<Car> {
        self.gateway
            .get_car(car_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Car", car_id))
    }

    pub async fn get_client(&self, client_id: ClientId) -> CoreResult<Client> {
        self.gateway
            .get_client(client_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Client", client_id))
    }

    pub async fn list_cars(&self) -> CoreResult<Vec<Car>> {
        self.gateway.list_cars().await
    }

    pub async fn list_clients(&self) -> CoreResult<Vec<Client>> {
        self.gateway.list_clients().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
