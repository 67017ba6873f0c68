//! # In-Memory Gateway
//!
//! A [`PersistenceGateway`] that keeps everything in process memory.
//! Each instance is an isolated store, so every test gets a fresh one.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::gateway::PersistenceGateway;
use crate::types::{
    Car, CarId, Client, ClientId, NewCar, NewClient, NewRental, Rental, RentalClosing,
    RentalFilter, RentalId,
};

#[derive(Debug, Default)]
struct Tables {
    cars: BTreeMap<CarId, Car>,
    clients: BTreeMap<ClientId, Client>,
    rentals: BTreeMap<RentalId, Rental>,
    next_car: i64,
    next_client: i64,
    next_rental: i64,
}

/// Next id for a table; ids start at 1 like SQLite's AUTOINCREMENT.
fn bump(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// A thread-safe in-memory store.
///
/// All three tables sit behind one `RwLock`, so a close is a single
/// check-and-set under the write guard.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGateway {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryGateway {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn insert_car(&self, car: &NewCar) -> CoreResult<Car> {
        let mut tables = self.tables.write().await;
        let id = CarId::new(bump(&mut tables.next_car));
        let car = Car {
            id,
            model: car.model.clone(),
            hourly_rate: car.hourly_rate,
            per_km_rate: car.per_km_rate,
        };
        tables.cars.insert(id, car.clone());
        Ok(car)
    }

    async fn get_car(&self, id: CarId) -> CoreResult<Option<Car>> {
        Ok(self.tables.read().await.cars.get(&id).cloned())
    }

    async fn list_cars(&self) -> CoreResult<Vec<Car>> {
        Ok(self.tables.read().await.cars.values().cloned().collect())
    }

    async fn insert_client(&self, client: &NewClient) -> CoreResult<Client> {
        let mut tables = self.tables.write().await;
        if tables.clients.values().any(|c| c.email == client.email) {
            return Err(CoreError::duplicate("email", client.email.clone()));
        }

        let id = ClientId::new(bump(&mut tables.next_client));
        let client = Client {
            id,
            full_name: client.full_name.clone(),
            email: client.email.clone(),
        };
        tables.clients.insert(id, client.clone());
        Ok(client)
    }

    async fn get_client(&self, id: ClientId) -> CoreResult<Option<Client>> {
        Ok(self.tables.read().await.clients.get(&id).cloned())
    }

    async fn list_clients(&self) -> CoreResult<Vec<Client>> {
        Ok(self.tables.read().await.clients.values().cloned().collect())
    }

    async fn insert_rental(&self, rental: &NewRental) -> CoreResult<Rental> {
        let mut tables = self.tables.write().await;

        // Same guarantee the SQLite foreign keys give.
        if !tables.cars.contains_key(&rental.car_id) {
            return Err(CoreError::not_found("Car", rental.car_id));
        }
        if !tables.clients.contains_key(&rental.client_id) {
            return Err(CoreError::not_found("Client", rental.client_id));
        }

        let id = RentalId::new(bump(&mut tables.next_rental));
        let rental = Rental {
            id,
            car_id: rental.car_id,
            client_id: rental.client_id,
            start_time: rental.start_time,
            closing: None,
        };
        tables.rentals.insert(id, rental.clone());
        Ok(rental)
    }

    async fn get_rental(&self, id: RentalId) -> CoreResult<Option<Rental>> {
        Ok(self.tables.read().await.rentals.get(&id).cloned())
    }

    async fn list_rentals(&self, filter: RentalFilter) -> CoreResult<Vec<Rental>> {
        Ok(self
            .tables
            .read()
            .await
            .rentals
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn close_rental(&self, id: RentalId, closing: &RentalClosing) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.rentals.get_mut(&id) {
            Some(rental) if rental.is_open() => {
                rental.closing = Some(closing.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn model_3() -> NewCar {
        NewCar {
            model: "Model 3".to_string(),
            hourly_rate: 10.0,
            per_km_rate: 0.5,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = InMemoryGateway::new();
        let first = store.insert_car(&model_3()).await.unwrap();
        let second = store.insert_car(&model_3()).await.unwrap();

        assert_eq!(first.id, CarId::new(1));
        assert_eq!(second.id, CarId::new(2));
        assert_eq!(store.list_cars().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryGateway::new();
        let ana = NewClient {
            full_name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
        };
        store.insert_client(&ana).await.unwrap();

        let err = store
            .insert_client(&NewClient {
                full_name: "Someone Else".to_string(),
                ..ana
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateKey { .. }));

        let stored = store.get_client(ClientId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Ana");
    }

    #[tokio::test]
    async fn test_close_is_check_and_set() {
        let store = InMemoryGateway::new();
        store.insert_car(&model_3()).await.unwrap();
        store
            .insert_client(&NewClient {
                full_name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
            })
            .await
            .unwrap();
        let rental = store
            .insert_rental(&NewRental {
                car_id: CarId::new(1),
                client_id: ClientId::new(1),
                start_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        let closing = RentalClosing {
            end_time: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            kilometers_driven: 20.0,
            total_amount: 30.0,
        };
        assert!(store.close_rental(rental.id, &closing).await.unwrap());

        let overwrite = RentalClosing {
            total_amount: 999.0,
            ..closing
        };
        assert!(!store.close_rental(rental.id, &overwrite).await.unwrap());
        assert!(!store.close_rental(RentalId::new(99), &overwrite).await.unwrap());

        let stored = store.get_rental(rental.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount(), Some(30.0));
        assert_eq!(
            store.list_rentals(RentalFilter::Open).await.unwrap().len(),
            0
        );
    }
}
