//! # Car Repository
//!
//! Database operations for the `cars` table.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fleet_core::{Car, CarId, NewCar};

/// Repository for car database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CarRepository::new(pool);
/// let car = repo.insert(&NewCar { model: "Model 3".into(), hourly_rate: 10.0, per_km_rate: 0.5 }).await?;
/// let same = repo.get_by_id(car.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    /// Creates a new CarRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CarRepository { pool }
    }

    /// Inserts a car and returns it with the id SQLite assigned.
    pub async fn insert(&self, car: &NewCar) -> DbResult<Car> {
        debug!(model = %car.model, "Inserting car");

        let result = sqlx::query(
            r#"
            INSERT INTO cars (model, hourly_rate, per_km_rate)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&car.model)
        .bind(car.hourly_rate)
        .bind(car.per_km_rate)
        .execute(&self.pool)
        .await?;

        Ok(Car {
            id: CarId::new(result.last_insert_rowid()),
            model: car.model.clone(),
            hourly_rate: car.hourly_rate,
            per_km_rate: car.per_km_rate,
        })
    }

    /// Gets a car by id.
    ///
    /// ## Returns
    /// * `Ok(Some(car))` - Car found
    /// * `Ok(None)` - No car with that id
    pub async fn get_by_id(&self, id: CarId) -> DbResult<Option<Car>> {
        debug!(car_id = %id, "Getting car by ID");

        let car = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, model, hourly_rate, per_km_rate
            FROM cars
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    /// Lists every car ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT id, model, hourly_rate, per_km_rate
            FROM cars
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = cars.len(), "Listed cars");
        Ok(cars)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
