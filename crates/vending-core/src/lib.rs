//! # vending-core: Pure Business Logic for Vending Oasis
//!
//! This crate holds the vending machine's business rules as plain functions
//! and owned data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vending Oasis Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vending-cli (terminal)                       │   │
//! │  │    select ──► coin ──► status ──► reset ──► load (settings)    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vending-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  change   │  │  session  │  │ validation│  │   │
//! │  │   │   Money   │  │ Calculator│  │  Basket   │  │  catalog  │  │   │
//! │  │   │  (cents)  │  │  greedy   │  │  Tendered │  │   coins   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`change`] - Change calculation engine
//! - [`session`] - Basket, tendered amount and stock for one customer
//! - [`types`] - Domain types (Product, Coin, ChangeLine, etc.)
//! - [`validation`] - Catalog and coin set rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vending_core::change::compute_change;
//! use vending_core::{euro_coin_ladder, Money};
//!
//! let bill: Money = "3.47".parse().unwrap();
//! let tendered: Money = "5.00".parse().unwrap();
//!
//! let lines = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
//! let returned: Vec<String> = lines
//!     .iter()
//!     .filter(|l| l.count > 0)
//!     .map(|l| format!("{}x{}", l.count, l.value))
//!     .collect();
//!
//! assert_eq!(returned, ["1x1.00", "1x0.50", "1x0.02", "1x0.01"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::{compute_change, ChangeCalculator};
pub use error::{ChangeError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::VendingSession;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum stock a single product may be configured with.
pub const MAX_PRODUCT_QUANTITY: i64 = 15;

/// Minimum price of a product in cents (0.01).
pub const MIN_PRICE_CENTS: i64 = 1;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Largest change amount the exact (minimum-coin) strategy will solve.
///
/// The table it builds is linear in the amount, so this caps memory at a few
/// megabytes. 10,000.00 is far beyond anything a vending machine hands back.
pub const MAX_EXACT_CHANGE_CENTS: i64 = 1_000_000;

/// Euro coin values in cents, smallest first.
pub const EURO_COIN_CENTS: [i64; 8] = [1, 2, 5, 10, 20, 50, 100, 200];

/// The euro coin ladder as `Money` values (0.01 up to 2.00).
pub fn euro_coin_ladder() -> Vec<Money> {
    EURO_COIN_CENTS.iter().copied().map(Money::from_cents).collect()
}
