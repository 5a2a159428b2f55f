//! # API Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Terminal Machine                   │
//! │                                                                         │
//! │  stdin: "select 9"                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler → Result<Vec<String>, ApiError>                 │  │
//! │  │         │                                                        │  │
//! │  │  CoreError::ProductNotFound ──────────► ApiError(NOT_FOUND)      │  │
//! │  │  CoreError::Change(..) ─── logged ────► "Unable to compute change"│ │
//! │  │  CatalogError ────────────────────────► ApiError(CATALOG_ERROR)  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout: "error: Product not found: 9"   (loop continues)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details of change failures go to the log, never to the user.

use serde::Serialize;
use vending_core::CoreError;

use crate::catalog::CatalogError;

/// Error returned from a command handler.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: 9" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product sold out
    OutOfStock,

    /// Basket and coin slot locked after payment
    BillPaid,

    /// Coin not in the accepted set
    CoinRejected,

    /// Change engine failure
    ChangeError,

    /// Catalog file could not be used
    CatalogError,

    /// Unrecognised command line
    UnknownCommand,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unknown_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                ApiError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            CoreError::OutOfStock { name, .. } => {
                ApiError::new(ErrorCode::OutOfStock, format!("{} is sold out", name))
            }
            CoreError::BillAlreadyPaid => ApiError::new(
                ErrorCode::BillPaid,
                "Bill already paid, use 'reset' to start again",
            ),
            CoreError::CoinNotAccepted { value } => ApiError::new(
                ErrorCode::CoinRejected,
                format!("Coin {} is not accepted", value),
            ),
            CoreError::Change(e) => {
                tracing::error!(error = %e, "Change calculation failed");
                ApiError::new(ErrorCode::ChangeError, "Unable to compute change")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts catalog loading errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::new(ErrorCode::CatalogError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
