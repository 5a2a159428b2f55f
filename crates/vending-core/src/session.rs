//! # Vending Session
//!
//! State of one customer interaction: what is in the basket, how much money
//! has been inserted, and how much stock is left.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  select_product  ┌──────────┐  insert_coin  ┌──────────┐  │
//! │  │  Empty   │─────────────────►│ Ordering │──────────────►│   Paid   │  │
//! │  │          │                  │          │ tendered>=bill│          │  │
//! │  └──────────┘                  └──────────┘               └────┬─────┘  │
//! │       ▲                             │ ▲                        │        │
//! │       │                             └─┘ select / insert        │        │
//! │       │                                                        │        │
//! │       └──────────────────────── reset ◄────────────────────────┘        │
//! │                                                                         │
//! │  Paid: basket and coin slot are locked, change() returns the coins     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is a plain owned value. Callers hold it and pass `&mut` to
//! whatever handles the next user action.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::change::{self, ChangeCalculator};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BasketItem, ChangeLine, Product};
use crate::validation::validate_catalog;

/// One customer's session at the machine.
#[derive(Debug, Clone)]
pub struct VendingSession {
    /// Catalog as loaded; `reset` restores stock from here.
    initial: Vec<Product>,
    /// Working copy with stock reduced by selections.
    products: Vec<Product>,
    basket: Vec<BasketItem>,
    tendered: Money,
    calculator: ChangeCalculator,
}

impl VendingSession {
    /// Starts a session over `products`, paying change from `calculator`.
    pub fn new(products: Vec<Product>, calculator: ChangeCalculator) -> Self {
        VendingSession {
            initial: products.clone(),
            products,
            basket: Vec::new(),
            tendered: Money::zero(),
            calculator,
        }
    }

    /// Products with their current stock.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn basket(&self) -> &[BasketItem] {
        &self.basket
    }

    pub fn calculator(&self) -> &ChangeCalculator {
        &self.calculator
    }

    /// Total inserted so far.
    pub fn tendered(&self) -> Money {
        self.tendered
    }

    /// Sum of price × quantity over the basket.
    pub fn bill(&self) -> Money {
        self.basket.iter().map(BasketItem::line_total).sum()
    }

    /// Paid means enough money is in and there is something to pay for.
    pub fn is_bill_paid(&self) -> bool {
        let bill = self.bill();
        !bill.is_zero() && self.tendered >= bill
    }

    /// Moves one unit of `product_id` from stock into the basket.
    ///
    /// ## Errors
    /// - [`CoreError::BillAlreadyPaid`] once the bill is paid
    /// - [`CoreError::ProductNotFound`] for an unknown id
    /// - [`CoreError::OutOfStock`] when no units are left
    pub fn select_product(&mut self, product_id: &str) -> CoreResult<&BasketItem> {
        if self.is_bill_paid() {
            return Err(CoreError::BillAlreadyPaid);
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                id: product.id.clone(),
                name: product.name.clone(),
            });
        }
        product.quantity -= 1;

        let index = match self.basket.iter().position(|i| i.product_id == product_id) {
            Some(index) => {
                self.basket[index].quantity += 1;
                index
            }
            None => {
                self.basket.push(BasketItem::from_product(product));
                self.basket.len() - 1
            }
        };

        let item = &self.basket[index];
        debug!(
            product_id,
            quantity = item.quantity,
            bill = %self.bill(),
            "Product added to basket"
        );
        Ok(item)
    }

    /// Adds a coin to the tendered amount and returns the new total.
    ///
    /// ## Errors
    /// - [`CoreError::BillAlreadyPaid`] once the bill is paid
    /// - [`CoreError::CoinNotAccepted`] for a value outside the coin set
    pub fn insert_coin(&mut self, value: Money) -> CoreResult<Money> {
        if self.is_bill_paid() {
            return Err(CoreError::BillAlreadyPaid);
        }
        if !self.calculator.accepts(value) {
            return Err(CoreError::CoinNotAccepted { value });
        }

        self.tendered += value;
        debug!(coin = %value, tendered = %self.tendered, bill = %self.bill(), "Coin inserted");

        if self.is_bill_paid() {
            info!(bill = %self.bill(), tendered = %self.tendered, "Bill paid");
        }
        Ok(self.tendered)
    }

    /// The coins to return, once paid.
    ///
    /// `Ok(None)` while the bill is unpaid. Once paid, `Ok(Some(lines))`
    /// with zero-count lines removed; an empty list means exact payment.
    pub fn change(&self) -> CoreResult<Option<Vec<ChangeLine>>> {
        if !self.is_bill_paid() {
            return Ok(None);
        }
        let lines = self.calculator.compute(self.bill(), self.tendered)?;
        Ok(Some(change::non_zero(&lines)))
    }

    /// Empties the basket and coin slot and puts all stock back.
    pub fn reset(&mut self) {
        self.basket.clear();
        self.tendered = Money::zero();
        self.products = self.initial.clone();
        info!("Session reset");
    }

    /// Replaces the catalog (settings save) and resets the session.
    ///
    /// The catalog is validated first; on error nothing changes.
    pub fn replace_catalog(&mut self, products: Vec<Product>) -> CoreResult<()> {
        validate_catalog(&products)?;
        info!(products = products.len(), "Catalog replaced");
        self.initial = products;
        self.reset();
        Ok(())
    }

    /// Serializable view of the session.
    pub fn summary(&self) -> CoreResult<SessionSummary> {
        Ok(SessionSummary {
            basket: self.basket.clone(),
            bill: self.bill(),
            tendered: self.tendered,
            paid: self.is_bill_paid(),
            change: self.change()?,
        })
    }
}

/// Snapshot for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub basket: Vec<BasketItem>,
    pub bill: Money,
    pub tendered: Money,
    pub paid: bool,
    pub change: Option<Vec<ChangeLine>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
