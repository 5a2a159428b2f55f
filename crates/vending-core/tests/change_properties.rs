//! Property-based tests for the change engine.
//!
//! These tests verify that:
//! - Returned coins always add up to exactly `tendered - bill`
//! - Results are deterministic for identical input
//! - Greedy is optimal on the euro ladder
//! - The minimum-coin strategy never hands back more coins than greedy

use proptest::prelude::*;
use vending_core::change::{coin_count, non_zero, total};
use vending_core::{
    compute_change, euro_coin_ladder, ChangeCalculator, ChangeError, ChangeStrategy, Money,
};

/// Strategy for a (bill, tendered) pair in cents with tendered >= bill.
fn arb_bill_and_tendered() -> impl Strategy<Value = (Money, Money)> {
    (0i64..10_000, 0i64..10_000).prop_map(|(bill, extra)| {
        (Money::from_cents(bill), Money::from_cents(bill + extra))
    })
}

/// Strategy for an arbitrary coin set that always contains 0.01.
fn arb_coin_set_with_cent() -> impl Strategy<Value = Vec<Money>> {
    prop::collection::vec(1i64..=500, 0..6).prop_map(|mut cents| {
        cents.push(1);
        cents.into_iter().map(Money::from_cents).collect()
    })
}

proptest! {
    /// Coins returned add up to the change due, to the cent.
    #[test]
    fn change_sums_to_difference((bill, tendered) in arb_bill_and_tendered()) {
        let lines = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
        prop_assert_eq!(total(&lines), tendered - bill);
    }

    /// Lines come back largest value first.
    #[test]
    fn lines_are_descending((bill, tendered) in arb_bill_and_tendered()) {
        let lines = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
        for pair in lines.windows(2) {
            prop_assert!(pair[0].value > pair[1].value);
        }
    }

    /// Same input, same output.
    #[test]
    fn change_is_deterministic((bill, tendered) in arb_bill_and_tendered()) {
        let first = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
        let second = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Input order of the coin set does not matter.
    #[test]
    fn coin_order_is_irrelevant(
        (bill, tendered) in arb_bill_and_tendered(),
        coins in Just(euro_coin_ladder()).prop_shuffle(),
    ) {
        let shuffled = compute_change(bill, tendered, &coins).unwrap();
        let sorted = compute_change(bill, tendered, &euro_coin_ladder()).unwrap();
        prop_assert_eq!(shuffled, sorted);
    }

    /// Paying the exact bill never returns a coin.
    #[test]
    fn exact_payment_returns_nothing(bill in 0i64..10_000) {
        let bill = Money::from_cents(bill);
        let lines = compute_change(bill, bill, &euro_coin_ladder()).unwrap();
        prop_assert!(non_zero(&lines).is_empty());
    }

    /// Underpayment is always rejected.
    #[test]
    fn underpayment_is_rejected(tendered in 0i64..10_000, short in 1i64..1_000) {
        let tendered = Money::from_cents(tendered);
        let bill = tendered + Money::from_cents(short);
        let result = compute_change(bill, tendered, &euro_coin_ladder());
        let is_invalid_amount = matches!(result, Err(ChangeError::InvalidAmount { .. }));
        prop_assert!(is_invalid_amount);
    }

    /// The euro ladder is canonical: greedy uses the fewest coins.
    #[test]
    fn greedy_is_optimal_on_euro_ladder(change in 0i64..2_000) {
        let greedy = ChangeCalculator::new(&euro_coin_ladder()).unwrap();
        let exact = greedy.clone().with_strategy(ChangeStrategy::MinimumCoins);
        let due = Money::from_cents(change);

        let g = greedy.compute(Money::zero(), due).unwrap();
        let e = exact.compute(Money::zero(), due).unwrap();
        prop_assert_eq!(coin_count(&g), coin_count(&e));
    }

    /// On any set containing 0.01 both strategies succeed, both sum to the
    /// change due, and minimum-coins is never worse.
    #[test]
    fn minimum_coins_never_worse(coins in arb_coin_set_with_cent(), change in 0i64..1_000) {
        let greedy = ChangeCalculator::new(&coins).unwrap();
        let exact = greedy.clone().with_strategy(ChangeStrategy::MinimumCoins);
        let due = Money::from_cents(change);

        let g = greedy.compute(Money::zero(), due).unwrap();
        let e = exact.compute(Money::zero(), due).unwrap();

        prop_assert_eq!(total(&g), due);
        prop_assert_eq!(total(&e), due);
        prop_assert!(coin_count(&e) <= coin_count(&g));
    }
}
