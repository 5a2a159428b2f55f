//! # Session Commands
//!
//! Product selection, coin insertion and change display.
//!
//! ## Purchase Flow
//! ```text
//! list ──► select <id> ──► coin <amount> ... ──► bill paid
//!                                                   │
//!                                                   ▼
//!                                        Change:
//!                                        [1x] 0.50EUR
//!                                        [1x] 0.20EUR
//!                                        Thanks for your purchase!
//! ```
//!
//! Once the bill is paid the basket and coin slot stay locked until `reset`.

use tracing::{debug, info};
use vending_core::{ChangeLine, Money, VendingSession};

use crate::error::ApiError;
use crate::state::ConfigState;

const THANKS: &str = "Thanks for your purchase!";

/// One line per product: `1: Water 1.30EUR [5 left]`.
pub fn list_products(session: &VendingSession, config: &ConfigState) -> Vec<String> {
    session
        .products()
        .iter()
        .map(|p| {
            let stock = if p.in_stock() {
                format!("[{} left]", p.quantity)
            } else {
                "[sold out]".to_string()
            };
            format!(
                "{}: {} {} {}",
                p.id,
                p.name,
                config.format_currency(p.price()),
                stock
            )
        })
        .collect()
}

/// Adds one unit of a product to the basket.
pub fn select_product(
    session: &mut VendingSession,
    config: &ConfigState,
    product_id: &str,
) -> Result<Vec<String>, ApiError> {
    let name = session.select_product(product_id)?.name.clone();
    debug!(product_id = %product_id, bill = %session.bill(), "Product selected");

    let mut lines = vec![format!(
        "Added {} (bill {})",
        name,
        config.format_currency(session.bill())
    )];
    lines.extend(paid_lines(session, config));
    Ok(lines)
}

/// Inserts one coin and, when that pays the bill, prints the change.
pub fn insert_coin(
    session: &mut VendingSession,
    config: &ConfigState,
    value: Money,
) -> Result<Vec<String>, ApiError> {
    let tendered = session.insert_coin(value)?;

    let mut lines = vec![format!(
        "Inserted {} (total {}, bill {})",
        config.format_currency(value),
        config.format_currency(tendered),
        config.format_currency(session.bill())
    )];
    lines.extend(paid_lines(session, config));
    Ok(lines)
}

/// Inserted amount, bill, basket and, once paid, the change.
pub fn status(session: &VendingSession, config: &ConfigState) -> Result<Vec<String>, ApiError> {
    let mut lines = vec![
        format!("Inserted: {}", config.format_currency(session.tendered())),
        format!("Bill: {}", config.format_currency(session.bill())),
    ];

    if session.basket().is_empty() {
        lines.push("Basket: empty".to_string());
    } else {
        lines.push("Basket:".to_string());
        for item in session.basket() {
            lines.push(format!(
                "  [{}x] {} {}",
                item.quantity,
                item.name,
                config.format_currency(item.line_total())
            ));
        }
    }

    lines.extend(paid_lines(session, config));
    Ok(lines)
}

/// The session summary as pretty JSON.
pub fn status_json(session: &VendingSession) -> Result<Vec<String>, ApiError> {
    let summary = session.summary()?;
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| ApiError::internal(format!("Failed to serialize status: {}", e)))?;
    Ok(vec![json])
}

/// Returns the machine to a fresh state.
pub fn reset(session: &mut VendingSession) -> Vec<String> {
    session.reset();
    info!("Machine reset");
    vec!["Machine reset".to_string()]
}

/// Accepted coins, largest first.
pub fn list_coins(config: &ConfigState) -> Result<Vec<String>, ApiError> {
    let mut coins = config
        .coin_set()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    coins.sort_by(|a, b| b.value.cmp(&a.value));

    Ok(coins
        .iter()
        .map(|c| format!("{} {}", config.format_currency(c.value), c.label))
        .collect())
}

/// Change block printed once the bill is paid; empty otherwise.
///
/// A change failure is reported inside the block so the inserted amount,
/// bill and basket lines around it are still printed. The session stays
/// paid until `reset`.
fn paid_lines(session: &VendingSession, config: &ConfigState) -> Vec<String> {
    match session.change() {
        Ok(None) => Vec::new(),
        Ok(Some(change)) => {
            let mut lines = change_lines(&change, config);
            lines.push(THANKS.to_string());
            lines
        }
        Err(e) => vec![
            ApiError::from(e).message,
            "Use 'reset' to get your coins back".to_string(),
        ],
    }
}

fn change_lines(change: &[ChangeLine], config: &ConfigState) -> Vec<String> {
    if change.is_empty() {
        return vec!["Change: 0".to_string()];
    }

    let mut lines = vec!["Change:".to_string()];
    lines.extend(
        change
            .iter()
            .map(|l| format!("[{}x] {}", l.count, config.format_currency(l.value))),
    );
    lines
}
