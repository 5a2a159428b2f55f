//! # Validation Module
//!
//! Rules for the data the machine is configured with: the product catalog
//! (edited on the settings screen) and the coin set.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog file / settings input                                │
//! │  └── Deserialization, exact decimal parsing of prices                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name, quantity (1-15), price (>= 0.01)                            │
//! │  ├── unique prices and ids across the catalog                          │
//! │  └── coin set non-empty and positive                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Change engine                                                │
//! │  └── Re-checks its own preconditions, never trusts the caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::validation::{validate_product_name, validate_product_quantity};
//!
//! assert!(validate_product_name("Sparkling Water").is_ok());
//! assert!(validate_product_quantity(16).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_PRODUCT_NAME_LEN, MAX_PRODUCT_QUANTITY, MIN_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a configured stock quantity.
///
/// ## Rules
/// - Between 1 and 15 inclusive
pub fn validate_product_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_PRODUCT_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_PRODUCT_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product price in cents.
///
/// ## Rules
/// - At least 0.01 (free items are not sold by the machine)
///
/// ## Example
/// ```rust
/// use vending_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(130).is_ok());
/// assert!(validate_price_cents(0).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < MIN_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: MIN_PRICE_CENTS,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates every field of one product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_product_name(&product.name)?;
    validate_product_quantity(product.quantity)?;
    validate_price_cents(product.price_cents)?;
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a full catalog as submitted from settings.
///
/// ## Rules
/// - At least one product
/// - Each product valid on its own
/// - Ids are unique
/// - Prices are unique (each product has a distinct price)
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    if products.is_empty() {
        return Err(ValidationError::Empty {
            item: "item".to_string(),
        });
    }

    let mut ids = HashSet::new();
    let mut prices = HashSet::new();

    for product in products {
        validate_product(product)?;

        if !ids.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: product.id.clone(),
            });
        }

        if !prices.insert(product.price_cents) {
            return Err(ValidationError::Duplicate {
                field: "price".to_string(),
                value: product.price().to_string(),
            });
        }
    }

    Ok(())
}

/// Validates the coin set the machine accepts and pays change from.
///
/// ## Rules
/// - At least one coin
/// - Every value strictly positive
pub fn validate_denominations(values: &[Money]) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::Empty {
            item: "coin".to_string(),
        });
    }

    if values.iter().any(|v| !v.is_positive()) {
        return Err(ValidationError::MustBePositive {
            field: "coin value".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
