//! # CLI Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the fleet CLI                          │
//! │                                                                         │
//! │  fleet rental close 1 --km 20                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  CliResult<Report>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ──── DbError ──► CoreError::Storage ──┐         │  │
//! │  │         │                                             │         │  │
//! │  │         ▼                                             ▼         │  │
//! │  │  Domain Error? ───── CoreError::InvalidState ────► CliError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr:  error[INVALID_STATE]: Rental 1 is closed, cannot perform ... │
//! │  status:  6                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use std::process::ExitCode;

use crate::state::ConfigError;
use fleet_core::CoreError;
use fleet_db::DbError;

/// Error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Car not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("error[{code}]: {message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes, one per failure class.
///
/// Each code maps to its own process exit status so shell scripts can
/// branch on the failure without parsing stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input failed validation (exit 3)
    Validation,

    /// Referenced car, client or rental does not exist (exit 4)
    NotFound,

    /// Unique field already taken (exit 5)
    DuplicateKey,

    /// Operation not allowed in the rental's current state (exit 6)
    InvalidState,

    /// Database could not complete the operation (exit 7)
    Storage,

    /// Environment or data directory unusable (exit 8)
    Config,

    /// Anything else (exit 1)
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DuplicateKey => "DUPLICATE_KEY",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::Storage => "STORAGE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    ///
    /// 2 is left to clap, which uses it for usage errors.
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::Validation => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::DuplicateKey => 5,
            ErrorCode::InvalidState => 6,
            ErrorCode::Storage => 7,
            ErrorCode::Config => 8,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Validation(_) => ErrorCode::Validation,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::DuplicateKey { .. } => ErrorCode::DuplicateKey,
            CoreError::InvalidState { .. } => ErrorCode::InvalidState,
            CoreError::Storage(detail) => {
                tracing::error!("Storage failure: {}", detail);
                ErrorCode::Storage
            }
        };
        CliError::new(code, err.to_string())
    }
}

/// Converts database errors to CLI errors through the domain taxonomy.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        CliError::from(CoreError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Could not encode output: {}", err))
    }
}

/// Result type for console commands.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Unit Tests
// =============================================================================
