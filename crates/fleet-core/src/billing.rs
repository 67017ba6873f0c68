//! # Billing Module
//!
//! Computes what a client owes when a rental is closed.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   hours        = (end_time - start_time) / 1 hour     (fractional)      │
//! │   total_amount = hours × hourly_rate + kilometers × per_km_rate         │
//! │                                                                         │
//! │   Example: 10:00 → 12:00, 20 km, Model 3 @ 10.0/h + 0.5/km              │
//! │            2.0 × 10.0 + 20 × 0.5 = 30.0                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The charge is a plain product-sum in `f64`. There is no minimum charge,
//! no rounding to currency units and no proration: 90 minutes bill as 1.5
//! hours, a 59-second rental bills as 59/3600 of an hour.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_distance, validate_rate, ValidationResult};

/// Seconds in one billable hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// =============================================================================
// Rate Card
// =============================================================================

/// A car's billing rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    /// Amount per hour of rental.
    pub hourly_rate: f64,
    /// Amount per kilometer driven.
    pub per_km_rate: f64,
}

impl RateCard {
    #[inline]
    pub const fn new(hourly_rate: f64, per_km_rate: f64) -> Self {
        RateCard {
            hourly_rate,
            per_km_rate,
        }
    }

    /// Checks that both rates are finite and non-negative.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate("hourly_rate", self.hourly_rate)?;
        validate_rate("per_km_rate", self.per_km_rate)?;
        Ok(())
    }

    /// Applies the rates to a duration in hours and a distance in kilometers.
    ///
    /// ## Example
    /// ```rust
    /// use fleet_core::billing::RateCard;
    ///
    /// let rates = RateCard::new(10.0, 0.5);
    /// assert_eq!(rates.charge(2.0, 20.0), 30.0);
    /// ```
    #[inline]
    pub fn charge(&self, hours: f64, kilometers: f64) -> f64 {
        hours * self.hourly_rate + kilometers * self.per_km_rate
    }

    /// Computes the amount owed for a rental, as stored on close.
    ///
    /// Finite inputs can still overflow `f64`; such a total is rejected
    /// rather than recorded as infinity.
    ///
    /// ## Errors
    /// `ValidationError::NotFinite` for field `total_amount`.
    pub fn total(&self, hours: f64, kilometers: f64) -> ValidationResult<f64> {
        let total = self.charge(hours, kilometers);
        if !total.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "total_amount".to_string(),
            });
        }
        Ok(total)
    }
}

// =============================================================================
// Duration
// =============================================================================

/// Returns the time between `start` and `end` as fractional hours.
///
/// Sub-second precision is kept: the elapsed time is converted through a
/// nanosecond-resolution duration before dividing.
///
/// ## Errors
/// `ValidationError::EndBeforeStart` when `end < start`. Equal timestamps
/// are allowed and yield `0.0`.
pub fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> ValidationResult<f64> {
    if end < start {
        return Err(ValidationError::EndBeforeStart {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }

    let elapsed = (end - start)
        .to_std()
        .map_err(|_| ValidationError::EndBeforeStart {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        })?;

    Ok(elapsed.as_secs_f64() / SECONDS_PER_HOUR)
}

// =============================================================================
// Return
// =============================================================================

/// Validates the data reported when a car comes back and returns the
/// billable hours.
///
/// ## Validation Order
/// 1. `kilometers_driven` must be finite and `>= 0`
/// 2. `end` must not be before `start`
pub fn check_return(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    kilometers_driven: f64,
) -> ValidationResult<f64> {
    validate_distance(kilometers_driven)?;
    elapsed_hours(start, end)
}

// =============================================================================
// Unit Tests
// =============================================================================
