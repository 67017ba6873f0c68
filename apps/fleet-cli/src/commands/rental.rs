//! # Rental Commands
//!
//! `fleet rental open | close | show | list`.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   rental open ──► OPEN ──── rental close ────► CLOSED (billed)          │
//! │                                                    │                    │
//! │                                  rental close ─────┴──► INVALID_STATE   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use super::Render;
use crate::error::CliResult;
use crate::state::AppState;
use fleet_core::{CarId, ClientId, Rental, RentalFilter, RentalId};

/// Result of `fleet rental open`.
#[derive(Debug, Serialize)]
pub struct RentalOpened {
    pub id: RentalId,
}

impl Render for RentalOpened {
    fn text(&self) -> String {
        format!("Rental opened with id {}", self.id)
    }
}

/// Result of `fleet rental close`.
#[derive(Debug, Serialize)]
pub struct RentalClosed {
    pub id: RentalId,
    pub total_amount: f64,
}

impl Render for RentalClosed {
    fn text(&self) -> String {
        format!(
            "Rental {} closed. Total amount: {:.2}",
            self.id, self.total_amount
        )
    }
}

/// Flat view of a rental for output.
#[derive(Debug, Serialize)]
pub struct RentalView {
    pub id: RentalId,
    pub car_id: CarId,
    pub client_id: ClientId,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub kilometers_driven: Option<f64>,
    pub total_amount: Option<f64>,
}

impl From<Rental> for RentalView {
    fn from(rental: Rental) -> Self {
        RentalView {
            id: rental.id,
            car_id: rental.car_id,
            client_id: rental.client_id,
            status: rental.status().to_string(),
            start_time: rental.start_time,
            end_time: rental.end_time(),
            kilometers_driven: rental.kilometers_driven(),
            total_amount: rental.total_amount(),
        }
    }
}

impl RentalView {
    fn line(&self) -> String {
        let end = self
            .end_time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "-".to_string());
        let km = self
            .kilometers_driven
            .map(|k| format!("{k:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let total = self
            .total_amount
            .map(|t| format!("{t:.2}"))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{:>4}  {:>4}  {:>6}  {:<6}  {}  {:<20}  {:>8}  {:>10}",
            self.id,
            self.car_id,
            self.client_id,
            self.status,
            self.start_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            end,
            km,
            total
        )
    }
}

const LIST_HEADER: &str =
    "  ID   CAR  CLIENT  STATUS  START                 END                         KM       TOTAL";

impl Render for RentalView {
    fn text(&self) -> String {
        format!("{LIST_HEADER}\n{}", self.line())
    }
}

/// Result of `fleet rental list`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RentalList(pub Vec<RentalView>);

impl Render for RentalList {
    fn text(&self) -> String {
        if self.0.is_empty() {
            return "No rentals.".to_string();
        }

        let mut out = LIST_HEADER.to_string();
        for rental in &self.0 {
            out.push('\n');
            out.push_str(&rental.line());
        }
        out
    }
}

pub async fn open(
    state: &AppState,
    car_id: i64,
    client_id: i64,
    start_time: DateTime<Utc>,
) -> CliResult<RentalOpened> {
    let id = state
        .ledger()
        .open(CarId::new(car_id), ClientId::new(client_id), start_time)
        .await?;
    info!(rental_id = %id, "Rental opened");
    Ok(RentalOpened { id })
}

pub async fn close(
    state: &AppState,
    id: i64,
    end_time: DateTime<Utc>,
    kilometers_driven: f64,
) -> CliResult<RentalClosed> {
    let id = RentalId::new(id);
    let total_amount = state.ledger().close(id, end_time, kilometers_driven).await?;
    info!(rental_id = %id, total_amount, "Rental closed");
    Ok(RentalClosed { id, total_amount })
}

pub async fn show(state: &AppState, id: i64) -> CliResult<RentalView> {
    Ok(state.ledger().get_rental(RentalId::new(id)).await?.into())
}

pub async fn list(state: &AppState, filter: RentalFilter) -> CliResult<RentalList> {
    let rentals = state.ledger().list_rentals(filter).await?;
    Ok(RentalList(rentals.into_iter().map(RentalView::from).collect()))
}
