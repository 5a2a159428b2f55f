//! # Change Calculation Engine
//!
//! Works out which coins to hand back once a bill has been paid.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_change(bill = 3.47, tendered = 5.00, coins)                   │
//! │                                                                         │
//! │  change due = 500 - 347 = 153 cents                                    │
//! │                                                                         │
//! │  coin   fits   count   remaining                                        │
//! │  2.00   0      0       153                                              │
//! │  1.00   1      1        53                                              │
//! │  0.50   1      1         3                                              │
//! │  0.20   0      0         3                                              │
//! │  0.10   0      0         3                                              │
//! │  0.05   0      0         3                                              │
//! │  0.02   1      1         1                                              │
//! │  0.01   1      1         0  ← stop                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step is integer arithmetic on cents, so `remaining >= coin` and the
//! `remaining == 0` stop test are exact.
//!
//! ## Lines
//! The engine emits one [`ChangeLine`] per denomination it tried, zero counts
//! included, largest value first. Callers drop the zero lines before display
//! (see [`non_zero`]).

use tracing::debug;

use crate::error::ChangeError;
use crate::money::Money;
use crate::types::{ChangeLine, ChangeStrategy};
use crate::MAX_EXACT_CHANGE_CENTS;

/// Computes change for `tendered - bill` with the greedy strategy.
///
/// ## Example
/// ```rust
/// use vending_core::change::{compute_change, non_zero};
/// use vending_core::{euro_coin_ladder, Money};
///
/// let lines = compute_change(
///     Money::from_cents(130),
///     Money::from_cents(200),
///     &euro_coin_ladder(),
/// )
/// .unwrap();
///
/// let paid: Vec<(i64, i64)> = non_zero(&lines)
///     .iter()
///     .map(|l| (l.value.cents(), l.count))
///     .collect();
/// assert_eq!(paid, [(50, 1), (20, 1)]);
/// ```
///
/// ## Errors
/// - [`ChangeError::NoDenominationsAvailable`] for an empty coin set
/// - [`ChangeError::InvalidDenomination`] for a zero or negative coin
/// - [`ChangeError::InvalidAmount`] when `tendered < bill` or an amount is negative
/// - [`ChangeError::UnrepresentableRemainder`] when the coins cannot make the amount
pub fn compute_change(
    bill: Money,
    tendered: Money,
    denominations: &[Money],
) -> Result<Vec<ChangeLine>, ChangeError> {
    ChangeCalculator::new(denominations)?.compute(bill, tendered)
}

// =============================================================================
// Calculator
// =============================================================================

/// A validated coin set plus the strategy used to pay out of it.
///
/// Build once from configuration and reuse; `compute` takes `&self` and
/// keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeCalculator {
    /// Distinct values, largest first.
    denominations: Vec<Money>,
    strategy: ChangeStrategy,
}

impl ChangeCalculator {
    /// Validates, deduplicates and sorts the coin set (descending).
    pub fn new(denominations: &[Money]) -> Result<Self, ChangeError> {
        if denominations.is_empty() {
            return Err(ChangeError::NoDenominationsAvailable);
        }
        if let Some(bad) = denominations.iter().find(|d| !d.is_positive()) {
            return Err(ChangeError::InvalidDenomination { value: *bad });
        }

        let mut sorted = denominations.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        Ok(ChangeCalculator {
            denominations: sorted,
            strategy: ChangeStrategy::default(),
        })
    }

    /// Replaces the strategy.
    pub fn with_strategy(mut self, strategy: ChangeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The coin set, largest first.
    pub fn denominations(&self) -> &[Money] {
        &self.denominations
    }

    pub fn strategy(&self) -> ChangeStrategy {
        self.strategy
    }

    /// Whether `value` is one of the coins.
    pub fn accepts(&self, value: Money) -> bool {
        self.denominations.contains(&value)
    }

    /// Computes the change lines for `tendered - bill`.
    pub fn compute(&self, bill: Money, tendered: Money) -> Result<Vec<ChangeLine>, ChangeError> {
        let due = change_due(bill, tendered)?;

        let lines = match self.strategy {
            ChangeStrategy::Greedy => greedy(due, &self.denominations)?,
            ChangeStrategy::MinimumCoins => {
                if due.cents() > MAX_EXACT_CHANGE_CENTS {
                    return Err(ChangeError::InvalidAmount { bill, tendered });
                }
                minimum_coins(due, &self.denominations)?
            }
        };

        debug!(
            %bill,
            %tendered,
            %due,
            strategy = %self.strategy,
            coins = coin_count(&lines),
            "Change computed"
        );
        Ok(lines)
    }
}

/// `tendered - bill`, refusing negative inputs and underpayment.
fn change_due(bill: Money, tendered: Money) -> Result<Money, ChangeError> {
    if bill.is_negative() || tendered.is_negative() || tendered < bill {
        return Err(ChangeError::InvalidAmount { bill, tendered });
    }
    Ok(tendered - bill)
}

// =============================================================================
// Strategies
// =============================================================================

/// Largest coin first until nothing is left.
///
/// `denominations` must be sorted descending.
fn greedy(amount: Money, denominations: &[Money]) -> Result<Vec<ChangeLine>, ChangeError> {
    let mut remaining = amount;
    let mut lines = Vec::with_capacity(denominations.len());

    for &value in denominations {
        if remaining.is_zero() {
            break;
        }
        let count = remaining.fits(value);
        lines.push(ChangeLine { value, count });
        remaining -= value * count;
    }

    if remaining.is_positive() {
        return Err(ChangeError::UnrepresentableRemainder { remaining });
    }
    Ok(lines)
}

/// Fewest coins for `amount` by dynamic programming over every cent value
/// up to `amount`. The caller bounds `amount` by `MAX_EXACT_CHANGE_CENTS`.
///
/// Ties go to the larger coin, so on canonical coin sets the answer matches
/// greedy line for line. Emits a line for every denomination.
fn minimum_coins(amount: Money, denominations: &[Money]) -> Result<Vec<ChangeLine>, ChangeError> {
    if amount.is_zero() {
        return Ok(Vec::new());
    }

    const UNREACHABLE: u32 = u32::MAX;
    let target = amount.cents() as usize;
    let coins: Vec<usize> = denominations.iter().map(|d| d.cents() as usize).collect();

    // best[a]: fewest coins summing to a; pick[a]: index of the last coin used
    let mut best = vec![UNREACHABLE; target + 1];
    let mut pick = vec![0u32; target + 1];
    best[0] = 0;

    for a in 1..=target {
        for (i, &coin) in coins.iter().enumerate() {
            if coin > a || best[a - coin] == UNREACHABLE {
                continue;
            }
            let candidate = best[a - coin] + 1;
            if candidate < best[a] {
                best[a] = candidate;
                pick[a] = i as u32;
            }
        }
    }

    if best[target] == UNREACHABLE {
        return Err(ChangeError::UnrepresentableRemainder { remaining: amount });
    }

    let mut counts = vec![0i64; coins.len()];
    let mut a = target;
    while a > 0 {
        let i = pick[a] as usize;
        counts[i] += 1;
        a -= coins[i];
    }

    Ok(denominations
        .iter()
        .zip(counts)
        .map(|(&value, count)| ChangeLine { value, count })
        .collect())
}

// =============================================================================
// Helpers
// =============================================================================

/// Drops zero-count lines, keeping order.
pub fn non_zero(lines: &[ChangeLine]) -> Vec<ChangeLine> {
    lines.iter().copied().filter(|l| l.count > 0).collect()
}

/// Sum of value × count over all lines.
pub fn total(lines: &[ChangeLine]) -> Money {
    lines.iter().map(ChangeLine::total).sum()
}

/// Number of coins handed back.
pub fn coin_count(lines: &[ChangeLine]) -> i64 {
    lines.iter().map(|l| l.count).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
