//! # Rental Repository
//!
//! Database operations for the `rentals` table.
//!
//! ## Closing a Rental
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Conditional Close                                    │
//! │                                                                         │
//! │  UPDATE rentals                                                        │
//! │     SET end_time = ?, kilometers_driven = ?, total_amount = ?          │
//! │   WHERE id = ? AND end_time IS NULL                                    │
//! │       │                                                                 │
//! │       ├── rows_affected = 1  → rental was open, now closed             │
//! │       └── rows_affected = 0  → missing or already closed               │
//! │                                                                         │
//! │  Two racing closes on the same rental: SQLite serializes the writes,   │
//! │  the second UPDATE matches no row and the caller reports InvalidState. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use fleet_core::{CarId, ClientId, NewRental, Rental, RentalClosing, RentalFilter, RentalId};

const SELECT_RENTAL: &str = r#"
    SELECT id, car_id, client_id, start_time, end_time, kilometers_driven, total_amount
    FROM rentals
"#;

/// Raw `rentals` row as SQLite hands it back.
///
/// The three closing columns are nullable individually; turning the row
/// into a [`Rental`] checks that they are either all set or all empty.
#[derive(Debug, sqlx::FromRow)]
struct RentalRow {
    id: i64,
    car_id: i64,
    client_id: i64,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    kilometers_driven: Option<f64>,
    total_amount: Option<f64>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = DbError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let closing = match (row.end_time, row.kilometers_driven, row.total_amount) {
            (None, None, None) => None,
            (Some(end_time), Some(kilometers_driven), Some(total_amount)) => Some(RentalClosing {
                end_time,
                kilometers_driven,
                total_amount,
            }),
            _ => {
                return Err(DbError::CorruptRecord {
                    entity: "Rental".to_string(),
                    id: row.id.to_string(),
                    reason: "closing fields partially set".to_string(),
                })
            }
        };

        Ok(Rental {
            id: RentalId::new(row.id),
            car_id: CarId::new(row.car_id),
            client_id: ClientId::new(row.client_id),
            start_time: row.start_time,
            closing,
        })
    }
}

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    /// Creates a new RentalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Inserts an open rental.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - car_id or client_id has no row
    pub async fn insert(&self, rental: &NewRental) -> DbResult<Rental> {
        debug!(
            car_id = %rental.car_id,
            client_id = %rental.client_id,
            "Opening rental"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO rentals (car_id, client_id, start_time)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(rental.car_id)
        .bind(rental.client_id)
        .bind(rental.start_time)
        .execute(&self.pool)
        .await?;

        Ok(Rental {
            id: RentalId::new(result.last_insert_rowid()),
            car_id: rental.car_id,
            client_id: rental.client_id,
            start_time: rental.start_time,
            closing: None,
        })
    }

    /// Gets a rental by id.
    ///
    /// ## Errors
    /// * `DbError::CorruptRecord` - The stored row is half closed
    pub async fn get_by_id(&self, id: RentalId) -> DbResult<Option<Rental>> {
        debug!(rental_id = %id, "Getting rental by ID");

        let sql = format!("{SELECT_RENTAL} WHERE id = ?");
        let row = sqlx::query_as::<_, RentalRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Rental::try_from).transpose()
    }

    /// Lists rentals matching `filter`, ordered by id.
    pub async fn list(&self, filter: RentalFilter) -> DbResult<Vec<Rental>> {
        let condition = match filter {
            RentalFilter::All => "",
            RentalFilter::Open => "WHERE end_time IS NULL",
            RentalFilter::Closed => "WHERE end_time IS NOT NULL",
        };
        let sql = format!("{SELECT_RENTAL} {condition} ORDER BY id");

        let rows = sqlx::query_as::<_, RentalRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), ?filter, "Listed rentals");
        rows.into_iter().map(Rental::try_from).collect()
    }

    /// Writes the closing fields of a rental that is still open.
    ///
    /// ## Returns
    /// * `Ok(true)` - The rental was open and is now closed
    /// * `Ok(false)` - No open rental with that id
    pub async fn close(&self, id: RentalId, closing: &RentalClosing) -> DbResult<bool> {
        debug!(
            rental_id = %id,
            total_amount = closing.total_amount,
            "Closing rental"
        );

        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET end_time = ?, kilometers_driven = ?, total_amount = ?
            WHERE id = ? AND end_time IS NULL
            "#,
        )
        .bind(closing.end_time)
        .bind(closing.kilometers_driven)
        .bind(closing.total_amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(rental_id = %id, "Close matched no open rental");
            return Ok(false);
        }

        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
