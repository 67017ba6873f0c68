//! # Error Types
//!
//! Domain-specific error types for fleet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fleet-core errors (this file)                                         │
//! │  ├── CoreError        - What Catalog / RentalLedger return             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fleet-db errors (separate crate)                                      │
//! │  └── DbError          - SQLite failures, folded into CoreError         │
//! │                                                                         │
//! │  fleet-cli errors (in app)                                             │
//! │  └── CliError         - What the console shows (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit status   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{RentalId, RentalStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by [`Catalog`](crate::Catalog) and
/// [`RentalLedger`](crate::RentalLedger).
///
/// Every failure is reported at the point it is detected. Nothing here is
/// retried and nothing is swallowed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input was malformed or out of range.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced car, client or rental does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A unique key is already taken.
    ///
    /// ## When This Occurs
    /// - Registering a client with an email that is already on file
    #[error("Duplicate {field}: '{value}' already exists")]
    DuplicateKey { field: String, value: String },

    /// The rental is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// ```text
    /// close(rental 7) ──► Closed, total = 30.0
    ///      │
    ///      ▼
    /// close(rental 7) ──► InvalidState { rental_id: 7, status: Closed }
    ///                      stored total stays 30.0
    /// ```
    #[error("Rental {rental_id} is {status}, cannot perform operation")]
    InvalidState {
        rental_id: RentalId,
        status: RentalStatus,
    },

    /// The persistence layer failed for a reason the domain cannot classify.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a DuplicateKey error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is written, so a failed validation never leaves a
/// partial record behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below zero.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// A rental cannot end before it started.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
