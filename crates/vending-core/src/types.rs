//! # Domain Types
//!
//! Core domain types used throughout Vending Oasis.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   BasketItem    │   │     Coin        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  label          │       │
//! │  │  name           │   │  name (frozen)  │   │  value (Money)  │       │
//! │  │  quantity       │   │  unit_price     │   └─────────────────┘       │
//! │  │  price_cents    │   │  quantity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   ChangeLine    │   │ ChangeStrategy  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  value (Money)  │   │  Greedy         │                             │
//! │  │  count          │   │  MinimumCoins   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product offered by the machine, as supplied by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Units in stock.
    pub quantity: i64,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if at least one unit is left.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Basket Item
// =============================================================================

/// A line in the customer's basket.
///
/// Name and price are frozen when the product is first selected, so a
/// catalog edit never changes a bill that is already being paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BasketItem {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl BasketItem {
    /// Creates a basket line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        BasketItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coin
// =============================================================================

/// A coin the machine accepts and pays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coin {
    /// Human label, e.g. "Fifty Cents".
    pub label: String,

    /// Face value.
    pub value: Money,
}

impl Coin {
    pub fn new(label: impl Into<String>, value: Money) -> Self {
        Coin {
            label: label.into(),
            value,
        }
    }
}

// =============================================================================
// Change Line
// =============================================================================

/// How many coins of one denomination to hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeLine {
    /// Denomination face value.
    pub value: Money,

    /// Number of coins of this value (may be 0).
    pub count: i64,
}

impl ChangeLine {
    /// Value × count.
    #[inline]
    pub fn total(&self) -> Money {
        self.value * self.count
    }
}

// =============================================================================
// Change Strategy
// =============================================================================

/// How the change engine picks coins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStrategy {
    /// Largest coin first. Optimal for the euro ladder and other canonical
    /// coin systems, not for arbitrary sets.
    #[default]
    Greedy,

    /// Exact fewest-coins solution for any coin set.
    MinimumCoins,
}

impl fmt::Display for ChangeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStrategy::Greedy => f.write_str("greedy"),
            ChangeStrategy::MinimumCoins => f.write_str("minimum_coins"),
        }
    }
}

impl FromStr for ChangeStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "greedy" => Ok(ChangeStrategy::Greedy),
            "minimum_coins" | "minimum" | "exact" => Ok(ChangeStrategy::MinimumCoins),
            _ => Err(ValidationError::InvalidFormat {
                field: "change_strategy".to_string(),
                reason: format!("unknown strategy '{}', expected greedy or minimum_coins", s),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
