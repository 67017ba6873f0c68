//! # Domain Types
//!
//! Core domain types used throughout the rental platform.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │      Car        │   │     Client      │   │       Rental        │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (CarId)     │◄──┼─────────────────┼───│  car_id             │   │
//! │  │  model          │   │  id (ClientId)  │◄──│  client_id          │   │
//! │  │  hourly_rate    │   │  full_name      │   │  start_time         │   │
//! │  │  per_km_rate    │   │  email (unique) │   │  closing: Option<   │   │
//! │  └─────────────────┘   └─────────────────┘   │    RentalClosing>   │   │
//! │                                              └─────────────────────┘   │
//! │                                                                         │
//! │  RentalClosing = end_time + kilometers_driven + total_amount           │
//! │  (all three appear together, or not at all)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record is keyed by an integer assigned by the store on insert.
//! The three id newtypes keep a `CarId` from being passed where a
//! `RentalId` is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::billing::RateCard;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[inline]
            pub const fn new(raw: i64) -> Self {
                $name(raw)
            }

            /// Returns the raw integer key.
            #[inline]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Car`].
    CarId
);
record_id!(
    /// Identifier of a [`Client`].
    ClientId
);
record_id!(
    /// Identifier of a [`Rental`].
    RentalId
);

// =============================================================================
// Car
// =============================================================================

/// A vehicle available for rent. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Car {
    pub id: CarId,
    pub model: String,
    /// Charged per hour of rental, fractional hours included.
    pub hourly_rate: f64,
    /// Charged per kilometer driven.
    pub per_km_rate: f64,
}

impl Car {
    /// Returns the car's billing rates.
    #[inline]
    pub fn rates(&self) -> RateCard {
        RateCard::new(self.hourly_rate, self.per_km_rate)
    }
}

/// Input for creating a car. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCar {
    pub model: String,
    pub hourly_rate: f64,
    pub per_km_rate: f64,
}

// =============================================================================
// Client
// =============================================================================

/// A person who rents cars. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
    /// Unique across all clients.
    pub email: String,
}

/// Input for registering a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub email: String,
}

// =============================================================================
// Rental Status
// =============================================================================

/// Lifecycle state of a rental.
///
/// ```text
///   open() ──► Open ──close()──► Closed
///                                  │
///                       close() ───┴──► InvalidState
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    /// Car is out; no end time, distance or amount yet.
    Open,
    /// Car has been returned and billed. Terminal.
    Closed,
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalStatus::Open => f.write_str("open"),
            RentalStatus::Closed => f.write_str("closed"),
        }
    }
}

// =============================================================================
// Rental
// =============================================================================

/// The fields written when a rental is closed.
///
/// Kept as one value so a rental can never carry an end time without a
/// distance and an amount, or the other way round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalClosing {
    pub end_time: DateTime<Utc>,
    pub kilometers_driven: f64,
    /// Derived by the ledger from the car's rates. Never caller-supplied.
    pub total_amount: f64,
}

/// A single hand-over of a car to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub car_id: CarId,
    pub client_id: ClientId,
    pub start_time: DateTime<Utc>,
    /// `None` while the rental is open.
    pub closing: Option<RentalClosing>,
}

impl Rental {
    /// Returns the lifecycle state derived from the closing fields.
    #[inline]
    pub fn status(&self) -> RentalStatus {
        if self.closing.is_some() {
            RentalStatus::Closed
        } else {
            RentalStatus::Open
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.closing.is_none()
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.closing.as_ref().map(|c| c.end_time)
    }

    pub fn kilometers_driven(&self) -> Option<f64> {
        self.closing.as_ref().map(|c| c.kilometers_driven)
    }

    pub fn total_amount(&self) -> Option<f64> {
        self.closing.as_ref().map(|c| c.total_amount)
    }
}

/// Input for opening a rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRental {
    pub car_id: CarId,
    pub client_id: ClientId,
    pub start_time: DateTime<Utc>,
}

/// Which rentals a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl RentalFilter {
    /// Checks whether a rental passes this filter.
    pub fn matches(&self, rental: &Rental) -> bool {
        match self {
            RentalFilter::All => true,
            RentalFilter::Open => rental.is_open(),
            RentalFilter::Closed => !rental.is_open(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open_rental() -> Rental {
        Rental {
            id: RentalId::new(1),
            car_id: CarId::new(1),
            client_id: ClientId::new(1),
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            closing: None,
        }
    }

    #[test]
    fn test_rental_status_follows_closing() {
        let mut rental = open_rental();
        assert_eq!(rental.status(), RentalStatus::Open);
        assert!(rental.end_time().is_none());
        assert!(rental.total_amount().is_none());

        rental.closing = Some(RentalClosing {
            end_time: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            kilometers_driven: 20.0,
            total_amount: 30.0,
        });
        assert_eq!(rental.status(), RentalStatus::Closed);
        assert_eq!(rental.kilometers_driven(), Some(20.0));
        assert_eq!(rental.total_amount(), Some(30.0));
    }

    #[test]
    fn test_rental_status_display() {
        assert_eq!(RentalStatus::Open.to_string(), "open");
        assert_eq!(RentalStatus::Closed.to_string(), "closed");
    }

    #[test]
    fn test_rental_filter() {
        let rental = open_rental();
        assert!(RentalFilter::All.matches(&rental));
        assert!(RentalFilter::Open.matches(&rental));
        assert!(!RentalFilter::Closed.matches(&rental));
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&CarId::new(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(RentalId::from(3).get(), 3);
    }
}
