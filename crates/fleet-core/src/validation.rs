//! # Validation Module
//!
//! Input validation for catalog and ledger operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Type checks (is it a number? a timestamp?)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog / RentalLedger                                       │
//! │  └── THIS MODULE: empty text, negative or non-finite numbers           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE (clients.email)                                            │
//! │  └── Foreign keys (rentals → cars, clients)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fleet_core::validation::{validate_model, validate_rate};
//!
//! assert!(validate_model("Model 3").is_ok());
//! assert!(validate_rate("hourly_rate", -1.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted car model name.
pub const MAX_MODEL_LEN: usize = 100;

/// Longest accepted client name.
pub const MAX_FULL_NAME_LEN: usize = 200;

/// Longest accepted email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// String Validators
// =============================================================================

/// Trims `value` and checks it is non-empty and at most `max` characters.
///
/// Returns the trimmed text so callers store exactly what was validated.
fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a car model name.
///
/// ## Example
/// ```rust
/// use fleet_core::validation::validate_model;
///
/// assert_eq!(validate_model("  Model Y ").unwrap(), "Model Y");
/// assert!(validate_model("").is_err());
/// ```
pub fn validate_model(model: &str) -> ValidationResult<String> {
    required_text("model", model, MAX_MODEL_LEN)
}

/// Validates a client's full name.
pub fn validate_full_name(full_name: &str) -> ValidationResult<String> {
    required_text("full_name", full_name, MAX_FULL_NAME_LEN)
}

/// Validates a client's email address.
///
/// Only presence and length are checked; uniqueness is the store's job.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    required_text("email", email, MAX_EMAIL_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a billing rate. Zero is allowed (free component).
///
/// ## Example
/// ```rust
/// use fleet_core::validation::validate_rate;
///
/// assert!(validate_rate("hourly_rate", 10.0).is_ok());
/// assert!(validate_rate("hourly_rate", 0.0).is_ok());
/// assert!(validate_rate("per_km_rate", -0.5).is_err());
/// ```
pub fn validate_rate(field: &str, rate: f64) -> ValidationResult<()> {
    non_negative(field, rate)
}

/// Validates the distance reported when a car is returned.
pub fn validate_distance(kilometers: f64) -> ValidationResult<()> {
    non_negative("kilometers_driven", kilometers)
}

// =============================================================================
// Unit Tests
// =============================================================================
