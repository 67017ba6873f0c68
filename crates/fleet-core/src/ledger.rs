//! # Rental Ledger
//!
//! Opens and closes rentals, and is the only writer of `total_amount`.
//!
//! ## Close Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  close(rental_id, end_time, kilometers_driven)                          │
//! │                                                                         │
//! │  1. load rental ─────────────── missing? ──► NotFound                   │
//! │  2. status check ────────────── closed?  ──► InvalidState               │
//! │  3. validate km / end_time ──── bad?     ──► Validation                 │
//! │  4. catalog.get_car_rates ───── missing? ──► NotFound                   │
//! │  5. hours = (end - start) / 1h                                          │
//! │  6. total = hours × hourly + km × per_km                                │
//! │  7. gateway.close_rental (conditional, atomic)                          │
//! │        └── lost a race to another close? ──► InvalidState               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Opening performs no overlap check: the same car may have several open
//! rentals at once. Double-booking detection is not part of this ledger.

use chrono::{DateTime, Utc};

use crate::billing::check_return;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::gateway::SharedGateway;
use crate::types::{
    CarId, ClientId, NewRental, Rental, RentalClosing, RentalFilter, RentalId, RentalStatus,
};

/// Owns rental records and the open/close billing workflow.
#[derive(Clone)]
pub struct RentalLedger {
    gateway: SharedGateway,
    catalog: Catalog,
}

impl RentalLedger {
    /// Creates a ledger that reads rates through `catalog` and stores
    /// rentals in `gateway`.
    pub fn new(gateway: SharedGateway, catalog: Catalog) -> Self {
        RentalLedger { gateway, catalog }
    }

    /// Opens a rental of `car_id` by `client_id` starting at `start_time`.
    ///
    /// ## Errors
    /// * `NotFound` - car or client does not exist (no rental is created)
    pub async fn open(
        &self,
        car_id: CarId,
        client_id: ClientId,
        start_time: DateTime<Utc>,
    ) -> CoreResult<RentalId> {
        self.catalog.get_car(car_id).await?;
        self.catalog.get_client(client_id).await?;

        let rental = self
            .gateway
            .insert_rental(&NewRental {
                car_id,
                client_id,
                start_time,
            })
            .await?;

        Ok(rental.id)
    }

    /// Closes an open rental and returns the amount owed.
    ///
    /// ## Errors
    /// * `NotFound` - rental, or its car, does not exist
    /// * `InvalidState` - rental is already closed
    /// * `Validation` - negative distance, `end_time < start_time`, or a total
    ///   that overflows `f64`
    pub async fn close(
        &self,
        rental_id: RentalId,
        end_time: DateTime<Utc>,
        kilometers_driven: f64,
    ) -> CoreResult<f64> {
        let rental = self.get_rental(rental_id).await?;
        if !rental.is_open() {
            return Err(CoreError::InvalidState {
                rental_id,
                status: rental.status(),
            });
        }

        let hours = check_return(rental.start_time, end_time, kilometers_driven)?;
        let rates = self.catalog.get_car_rates(rental.car_id).await?;
        let closing = RentalClosing {
            end_time,
            kilometers_driven,
            total_amount: rates.total(hours, kilometers_driven)?,
        };

        if !self.gateway.close_rental(rental_id, &closing).await? {
            return Err(CoreError::InvalidState {
                rental_id,
                status: RentalStatus::Closed,
            });
        }

        Ok(closing.total_amount)
    }

    pub async fn get_rental(&self, rental_id: RentalId) -> CoreResult<Rental> {
        self.gateway
            .get_rental(rental_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Rental", rental_id))
    }

    pub async fn list_rentals(&self, filter: RentalFilter) -> CoreResult<Vec<Rental>> {
        self.gateway.list_rentals(filter).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::memory::InMemoryGateway;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    async fn setup() -> (Catalog, RentalLedger) {
        let gateway: SharedGateway = Arc::new(InMemoryGateway::new());
        let catalog = Catalog::new(gateway.clone());
        let ledger = RentalLedger::new(gateway, catalog.clone());

        catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
        catalog.register_client("Ana", "ana@x.com").await.unwrap();
        (catalog, ledger)
    }

    #[tokio::test]
    async fn test_open_then_close_scenario() {
        let (_, ledger) = setup().await;

        let rental_id = ledger
            .open(CarId::new(1), ClientId::new(1), at(10, 0))
            .await
            .unwrap();
        assert_eq!(rental_id, RentalId::new(1));
        assert!(ledger.get_rental(rental_id).await.unwrap().is_open());

        let total = ledger.close(rental_id, at(12, 0), 20.0).await.unwrap();
        assert_eq!(total, 30.0);

        let rental = ledger.get_rental(rental_id).await.unwrap();
        assert_eq!(rental.status(), RentalStatus::Closed);
        assert_eq!(rental.end_time(), Some(at(12, 0)));
        assert_eq!(rental.kilometers_driven(), Some(20.0));
        assert_eq!(rental.total_amount(), Some(30.0));
    }

    #[tokio::test]
    async fn test_second_close_is_invalid_state() {
        let (_, ledger) = setup().await;
        let rental_id = ledger
            .open(CarId::new(1), ClientId::new(1), at(10, 0))
            .await
            .unwrap();
        ledger.close(rental_id, at(12, 0), 20.0).await.unwrap();

        let err = ledger.close(rental_id, at(15, 0), 500.0).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidState {
                status: RentalStatus::Closed,
                ..
            }
        ));

        let rental = ledger.get_rental(rental_id).await.unwrap();
        assert_eq!(rental.total_amount(), Some(30.0));
        assert_eq!(rental.end_time(), Some(at(12, 0)));
    }

    #[tokio::test]
    async fn test_open_with_unknown_references() {
        let (_, ledger) = setup().await;

        let err = ledger
            .open(CarId::new(42), ClientId::new(1), at(10, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "Car", .. }));

        let err = ledger
            .open(CarId::new(1), ClientId::new(42), at(10, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "Client", .. }));

        assert!(ledger
            .list_rentals(RentalFilter::All)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_close_unknown_rental() {
        let (_, ledger) = setup().await;
        let err = ledger
            .close(RentalId::new(7), at(12, 0), 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "Rental", .. }));
    }

    #[tokio::test]
    async fn test_close_validation_leaves_rental_open() {
        let (_, ledger) = setup().await;
        let rental_id = ledger
            .open(CarId::new(1), ClientId::new(1), at(10, 0))
            .await
            .unwrap();

        let err = ledger.close(rental_id, at(12, 0), -5.0).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Negative { .. })
        ));

        let err = ledger.close(rental_id, at(9, 0), 5.0).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EndBeforeStart { .. })
        ));

        assert!(ledger.get_rental(rental_id).await.unwrap().is_open());

        // Still closable with good data.
        assert_eq!(ledger.close(rental_id, at(10, 30), 0.0).await.unwrap(), 5.0);
    }

    #[tokio::test]
    async fn test_overflowing_total_leaves_rental_open() {
        let (catalog, ledger) = setup().await;
        let car_id = catalog.add_car("Big", 1e308, 1e308).await.unwrap();
        let rental_id = ledger
            .open(car_id, ClientId::new(1), at(10, 0))
            .await
            .unwrap();

        let err = ledger.close(rental_id, at(20, 0), 1e308).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotFinite { ref field }) if field == "total_amount"
        ));

        let rental = ledger.get_rental(rental_id).await.unwrap();
        assert!(rental.is_open());
        assert_eq!(rental.total_amount(), None);
    }

    #[tokio::test]
    async fn test_same_car_can_be_double_booked() {
        let (catalog, ledger) = setup().await;
        let bruno = catalog
            .register_client("Bruno", "bruno@x.com")
            .await
            .unwrap();

        let first = ledger
            .open(CarId::new(1), ClientId::new(1), at(10, 0))
            .await
            .unwrap();
        let second = ledger.open(CarId::new(1), bruno, at(10, 30)).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            ledger.list_rentals(RentalFilter::Open).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_concurrent_closes_bill_once() {
        let (_, ledger) = setup().await;
        let rental_id = ledger
            .open(CarId::new(1), ClientId::new(1), at(10, 0))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            ledger.close(rental_id, at(12, 0), 20.0),
            ledger.close(rental_id, at(13, 0), 40.0),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);

        let failure = if a.is_err() { a } else { b };
        assert!(matches!(failure, Err(CoreError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_list_rentals_by_status() {
        let (_, ledger) = setup().await;
        let first = ledger
            .open(CarId::new(1), ClientId::new(1), at(8, 0))
            .await
            .unwrap();
        ledger
            .open(CarId::new(1), ClientId::new(1), at(9, 0))
            .await
            .unwrap();
        ledger.close(first, at(9, 0), 10.0).await.unwrap();

        let open = ledger.list_rentals(RentalFilter::Open).await.unwrap();
        let closed = ledger.list_rentals(RentalFilter::Closed).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, first);
    }
}
