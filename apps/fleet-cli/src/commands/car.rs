//! # Car Commands
//!
//! `fleet car add | list | rates`.

use serde::Serialize;
use tracing::info;

use super::Render;
use crate::error::CliResult;
use crate::state::AppState;
use fleet_core::{Car, CarId, RateCard};

/// Result of `fleet car add`.
#[derive(Debug, Serialize)]
pub struct CarAdded {
    pub id: CarId,
}

impl Render for CarAdded {
    fn text(&self) -> String {
        format!("Car added with id {}", self.id)
    }
}

/// Result of `fleet car list`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CarList(pub Vec<Car>);

impl Render for CarList {
    fn text(&self) -> String {
        if self.0.is_empty() {
            return "No cars registered.".to_string();
        }

        let mut out = format!("{:>4}  {:<24} {:>10} {:>10}", "ID", "MODEL", "PER HOUR", "PER KM");
        for car in &self.0 {
            out.push_str(&format!(
                "\n{:>4}  {:<24} {:>10.2} {:>10.2}",
                car.id, car.model, car.hourly_rate, car.per_km_rate
            ));
        }
        out
    }
}

/// Result of `fleet car rates`.
#[derive(Debug, Serialize)]
pub struct CarRates {
    pub car_id: CarId,
    #[serde(flatten)]
    pub rates: RateCard,
}

impl Render for CarRates {
    fn text(&self) -> String {
        format!(
            "Car {}: {:.2} per hour, {:.2} per km",
            self.car_id, self.rates.hourly_rate, self.rates.per_km_rate
        )
    }
}

pub async fn add(
    state: &AppState,
    model: &str,
    hourly_rate: f64,
    per_km_rate: f64,
) -> CliResult<CarAdded> {
    let id = state.catalog().add_car(model, hourly_rate, per_km_rate).await?;
    info!(car_id = %id, "Car added");
    Ok(CarAdded { id })
}

pub async fn list(state: &AppState) -> CliResult<CarList> {
    Ok(CarList(state.catalog().list_cars().await?))
}

pub async fn rates(state: &AppState, id: i64) -> CliResult<CarRates> {
    let car_id = CarId::new(id);
    let rates = state.catalog().get_car_rates(car_id).await?;
    Ok(CarRates { car_id, rates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::render;
    use crate::error::ErrorCode;
    use fleet_db::{Database, DbConfig};

    async fn state() -> AppState {
        AppState::from_database(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_add_then_rates() {
        let state = state().await;

        let added = add(&state, "Model 3", 10.0, 0.5).await.unwrap();
        assert_eq!(added.id, CarId::new(1));
        assert_eq!(render(&added, false).unwrap(), "Car added with id 1");

        let rates = rates(&state, 1).await.unwrap();
        assert_eq!(rates.rates, RateCard::new(10.0, 0.5));
        assert_eq!(
            render(&rates, false).unwrap(),
            "Car 1: 10.00 per hour, 0.50 per km"
        );

        let json: serde_json::Value =
            serde_json::from_str(&render(&rates, true).unwrap()).unwrap();
        assert_eq!(json["car_id"], 1);
        assert_eq!(json["hourly_rate"], 10.0);
    }

    #[tokio::test]
    async fn test_negative_rate_is_validation_error() {
        let state = state().await;
        let err = add(&state, "Model 3", -1.0, 0.5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(list(&state).await.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_rates_for_unknown_car() {
        let state = state().await;
        let err = rates(&state, 9).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_text() {
        let state = state().await;
        assert_eq!(render(&list(&state).await.unwrap(), false).unwrap(), "No cars registered.");

        add(&state, "Yaris", 8.0, 0.25).await.unwrap();
        let text = render(&list(&state).await.unwrap(), false).unwrap();
        assert!(text.contains("Yaris"));
        assert!(text.contains("8.00"));
    }
}
