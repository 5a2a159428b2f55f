//! # Error Types
//!
//! Domain-specific error types for vending-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vending-core errors (this file)                                       │
//! │  ├── ChangeError      - Change engine pre/postcondition failures       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - Session errors, wraps the two above            │
//! │                                                                         │
//! │  vending-cli errors (in app)                                           │
//! │  └── ApiError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ChangeError / ValidationError → CoreError → ApiError → stdout   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, amount, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Change Error
// =============================================================================

/// Failures of the change calculation engine.
///
/// None of these occur when the caller upholds `tendered >= bill` and the
/// coin set reaches down to the minor unit. They are reported instead of
/// looping or returning a short-changed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// Tendered amount is below the bill, or an amount is negative.
    #[error("Invalid amount: bill {bill}, tendered {tendered}")]
    InvalidAmount { bill: Money, tendered: Money },

    /// The coin set is empty.
    #[error("No denominations available to give change")]
    NoDenominationsAvailable,

    /// A coin value is zero or negative.
    #[error("Invalid denomination: {value}")]
    InvalidDenomination { value: Money },

    /// The coin set cannot pay out the remaining amount exactly.
    ///
    /// ## When This Occurs
    /// - Smallest coin is 0.05 and the change is 0.03
    /// - Greedy strategy on a non-canonical set, e.g. {0.05, 0.02} for 0.06
    #[error("Cannot return {remaining} with the available denominations")]
    UnrepresentableRemainder { remaining: Money },
}

// =============================================================================
// Core Error
// =============================================================================

/// Vending session errors.
///
/// These errors represent business rule violations raised while a customer
/// uses the machine. They should be translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no stock left.
    #[error("{name} is out of stock")]
    OutOfStock { id: String, name: String },

    /// The bill has been paid; the basket and coin slot are locked until reset.
    #[error("Bill already paid, reset the machine to start a new purchase")]
    BillAlreadyPaid,

    /// The machine does not take this coin.
    #[error("Coin {value} is not accepted")]
    CoinNotAccepted { value: Money },

    /// Change calculation failed.
    #[error("Change error: {0}")]
    Change(#[from] ChangeError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when catalog or configuration input doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products with the same price).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A collection that must have entries is empty.
    #[error("At least one {item} must exist")]
    Empty { item: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_error_messages() {
        let err = ChangeError::InvalidAmount {
            bill: Money::from_cents(200),
            tendered: Money::from_cents(150),
        };
        assert_eq!(err.to_string(), "Invalid amount: bill 2.00, tendered 1.50");

        let err = ChangeError::UnrepresentableRemainder {
            remaining: Money::from_cents(3),
        };
        assert_eq!(
            err.to_string(),
            "Cannot return 0.03 with the available denominations"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Empty {
            item: "product".to_string(),
        };
        assert_eq!(err.to_string(), "At least one product must exist");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = ChangeError::NoDenominationsAvailable.into();
        assert!(matches!(core_err, CoreError::Change(_)));

        let core_err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
