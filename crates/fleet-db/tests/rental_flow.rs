//! End-to-end rental flows against SQLite through the domain components.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fleet_core::{
    CarId, Catalog, ClientId, CoreError, RentalFilter, RentalId, RentalLedger, RentalStatus,
    SharedGateway, ValidationError,
};
use fleet_db::{Database, DbConfig};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
}

fn components(db: Database) -> (Catalog, RentalLedger) {
    let gateway: SharedGateway = Arc::new(db);
    let catalog = Catalog::new(gateway.clone());
    let ledger = RentalLedger::new(gateway, catalog.clone());
    (catalog, ledger)
}

async fn in_memory() -> (Catalog, RentalLedger) {
    components(Database::new(DbConfig::in_memory()).await.unwrap())
}

#[tokio::test]
async fn two_hour_rental_bills_thirty() {
    let (catalog, ledger) = in_memory().await;

    let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
    let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
    let rental = ledger.open(car, ana, at(10, 0)).await.unwrap();

    let total = ledger.close(rental, at(12, 0), 20.0).await.unwrap();
    assert_eq!(total, 30.0);

    let stored = ledger.get_rental(rental).await.unwrap();
    assert_eq!(stored.status(), RentalStatus::Closed);
    assert_eq!(stored.end_time(), Some(at(12, 0)));
    assert_eq!(stored.kilometers_driven(), Some(20.0));
    assert_eq!(stored.total_amount(), Some(30.0));
}

#[tokio::test]
async fn second_close_is_rejected_and_keeps_first_amount() {
    let (catalog, ledger) = in_memory().await;
    let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
    let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
    let rental = ledger.open(car, ana, at(10, 0)).await.unwrap();

    ledger.close(rental, at(12, 0), 20.0).await.unwrap();
    let err = ledger.close(rental, at(14, 0), 50.0).await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::InvalidState {
            status: RentalStatus::Closed,
            ..
        }
    ));
    assert_eq!(ledger.get_rental(rental).await.unwrap().total_amount(), Some(30.0));
}

#[tokio::test]
async fn racing_closes_bill_exactly_once() {
    let (catalog, ledger) = in_memory().await;
    let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
    let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
    let rental = ledger.open(car, ana, at(10, 0)).await.unwrap();

    let (a, b) = tokio::join!(
        ledger.close(rental, at(12, 0), 20.0),
        ledger.close(rental, at(13, 0), 40.0),
    );

    let (winner, loser) = match (a, b) {
        (Ok(total), Err(err)) | (Err(err), Ok(total)) => (total, err),
        other => panic!("expected exactly one success, got {other:?}"),
    };
    assert!(matches!(loser, CoreError::InvalidState { .. }));
    assert_eq!(ledger.get_rental(rental).await.unwrap().total_amount(), Some(winner));
}

#[tokio::test]
async fn duplicate_email_is_duplicate_key() {
    let (catalog, _) = in_memory().await;
    catalog.register_client("Ana", "ana@x.com").await.unwrap();

    let err = catalog
        .register_client("Ana Again", "ana@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateKey { ref field, .. } if field == "email"));
    assert_eq!(catalog.list_clients().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let (catalog, ledger) = in_memory().await;
    let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
    let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();

    let err = ledger.open(CarId::new(99), ana, at(10, 0)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Car", .. }));

    let err = ledger.open(car, ClientId::new(99), at(10, 0)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Client", .. }));

    let err = ledger.close(RentalId::new(99), at(12, 0), 1.0).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Rental", .. }));

    let err = catalog.get_car_rates(CarId::new(99)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "Car", .. }));

    assert!(ledger.list_rentals(RentalFilter::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_close_leaves_rental_open() {
    let (catalog, ledger) = in_memory().await;
    let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
    let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
    let rental = ledger.open(car, ana, at(10, 0)).await.unwrap();

    let err = ledger.close(rental, at(9, 0), 5.0).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::EndBeforeStart { .. })
    ));

    let err = ledger.close(rental, at(12, 0), -1.0).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert!(ledger.get_rental(rental).await.unwrap().is_open());
    assert_eq!(ledger.close(rental, at(11, 30), 0.0).await.unwrap(), 15.0);
}

#[tokio::test]
async fn data_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.db");

    let (car, rental) = {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let (catalog, ledger) = components(db.clone());
        let car = catalog.add_car("Model 3", 10.0, 0.5).await.unwrap();
        let ana = catalog.register_client("Ana", "ana@x.com").await.unwrap();
        let rental = ledger.open(car, ana, at(10, 0)).await.unwrap();
        ledger.close(rental, at(12, 0), 20.0).await.unwrap();
        db.close().await;
        (car, rental)
    };

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let (catalog, ledger) = components(db);

    assert_eq!(catalog.get_car(car).await.unwrap().model, "Model 3");
    assert_eq!(ledger.get_rental(rental).await.unwrap().total_amount(), Some(30.0));

    // Ids keep climbing after a restart
    let next = catalog.add_car("Yaris", 8.0, 0.3).await.unwrap();
    assert!(next > car);

    // Unique email still enforced after reopening
    let err = catalog.register_client("Ana", "ana@x.com").await.unwrap_err();
    assert!(matches!(err, CoreError::DuplicateKey { .. }));
}
