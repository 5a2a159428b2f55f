//! # Commands Module
//!
//! Turns input lines into calls on the [`VendingSession`].
//!
//! ## Command Categories
//!
//! ### Session Commands (`session.rs`)
//! - `list` - Show products and stock
//! - `select <id>` / `buy <id>` - Put one unit in the basket
//! - `coin <amount>` - Insert a coin
//! - `status [--json]` - Inserted amount, bill, basket, change
//! - `reset` - Empty basket and coin slot, restore stock
//! - `coins` - Show accepted coins
//!
//! ### Settings Commands (`settings.rs`)
//! - `load <path>` - Validate and replace the catalog
//!
//! ## Handler Pattern
//! Every handler returns `Result<Vec<String>, ApiError>`: the lines to print
//! on success, or an error the loop prints before reading the next line.

pub mod session;
pub mod settings;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, warn};
use vending_core::{Money, VendingSession};

use crate::error::ApiError;
use crate::state::ConfigState;

pub const HELP: &str = "\
Commands:
  list               show products
  select <id>        add one product to the basket (alias: buy)
  coin <amount>      insert a coin, e.g. coin 0.50
  coins              show accepted coins
  status [--json]    show inserted amount, bill and basket
  reset              empty the basket and return to a fresh machine
  load <path>        replace the catalog from a JSON file
  help               show this help
  quit               leave";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Select(String),
    Coin(Money),
    Coins,
    Status { json: bool },
    Reset,
    Load(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        let extra = words.next();

        let command = match (name.as_str(), arg, extra) {
            ("list", None, None) => Command::List,
            ("select" | "buy", Some(id), None) => Command::Select(id.to_string()),
            ("coin" | "insert", Some(amount), None) => {
                let value = amount
                    .parse::<Money>()
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                Command::Coin(value)
            }
            ("coins", None, None) => Command::Coins,
            ("status", None, None) => Command::Status { json: false },
            ("status", Some("--json"), None) => Command::Status { json: true },
            ("reset", None, None) => Command::Reset,
            ("load", Some(path), None) => Command::Load(PathBuf::from(path)),
            ("help" | "?", None, None) => Command::Help,
            ("quit" | "exit", None, None) => Command::Quit,
            ("select" | "buy" | "coin" | "insert" | "load", None, None) => {
                return Err(ApiError::unknown_command(format!(
                    "'{}' needs an argument, try 'help'",
                    name
                )));
            }
            _ => {
                return Err(ApiError::unknown_command(format!(
                    "Unknown command: {}, try 'help'",
                    line
                )));
            }
        };

        Ok(Some(command))
    }
}

/// Runs one command against the session.
pub fn execute(
    session: &mut VendingSession,
    config: &ConfigState,
    command: Command,
) -> Result<Vec<String>, ApiError> {
    debug!(?command, "Executing command");

    match command {
        Command::List => Ok(session::list_products(session, config)),
        Command::Select(id) => session::select_product(session, config, &id),
        Command::Coin(value) => session::insert_coin(session, config, value),
        Command::Coins => session::list_coins(config),
        Command::Status { json: false } => session::status(session, config),
        Command::Status { json: true } => session::status_json(session),
        Command::Reset => Ok(session::reset(session)),
        Command::Load(path) => settings::load_catalog_file(session, &path),
        Command::Help => Ok(HELP.lines().map(str::to_string).collect()),
        Command::Quit => Ok(Vec::new()),
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Command errors are printed as `error: <message>` and do not stop the loop.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut VendingSession,
    config: &ConfigState,
    input: R,
    mut out: W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;

        let result = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(session, config, command),
            Err(e) => Err(e),
        };

        match result {
            Ok(lines) => {
                for l in lines {
                    writeln!(out, "{}", l)?;
                }
            }
            Err(e) => {
                warn!(code = ?e.code, message = %e.message, "Command failed");
                writeln!(out, "error: {}", e.message)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vending_core::{ChangeCalculator, Product};

    fn session() -> VendingSession {
        let products = vec![
            Product {
                id: "1".to_string(),
                name: "Water".to_string(),
                quantity: 2,
                price_cents: 130,
            },
            Product {
                id: "2".to_string(),
                name: "Crisps".to_string(),
                quantity: 1,
                price_cents: 347,
            },
        ];
        let calculator = ChangeCalculator::new(&vending_core::euro_coin_ladder()).unwrap();
        VendingSession::new(products, calculator)
    }

    fn run(script: &str) -> String {
        let mut s = session();
        let config = ConfigState::default();
        let mut out = Vec::new();
        run_loop(&mut s, &config, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("list").unwrap(), Some(Command::List));
        assert_eq!(
            Command::parse("  BUY 2 ").unwrap(),
            Some(Command::Select("2".to_string()))
        );
        assert_eq!(
            Command::parse("coin 0.5").unwrap(),
            Some(Command::Coin(Money::from_cents(50)))
        );
        assert_eq!(
            Command::parse("status --json").unwrap(),
            Some(Command::Status { json: true })
        );
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("# comment").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("coin").is_err());
        assert!(Command::parse("coin abc").is_err());
        assert!(Command::parse("select 1 2").is_err());
    }

    #[test]
    fn test_purchase_with_change() {
        let out = run("select 1\ncoin 2\n");
        assert!(out.contains("Change:\n[1x] 0.50EUR\n[1x] 0.20EUR\n"));
        assert!(out.contains("Thanks for your purchase!"));
    }

    #[test]
    fn test_purchase_one_fifty_three_change() {
        let out = run("select 2\ncoin 2\ncoin 2\ncoin 1\n");
        assert!(out.contains("[1x] 1.00EUR\n[1x] 0.50EUR\n[1x] 0.02EUR\n[1x] 0.01EUR\n"));
    }

    #[test]
    fn test_exact_payment() {
        let out = run("select 1\ncoin 1\ncoin 0.20\ncoin 0.10\n");
        assert!(out.contains("Change: 0"));
    }

    #[test]
    fn test_errors_do_not_stop_loop() {
        let out = run("select 9\ncoin 0.25\nselect 1\nstatus\n");
        assert!(out.contains("error: Product not found: 9"));
        assert!(out.contains("error: Coin 0.25 is not accepted"));
        assert!(out.contains("Bill: 1.30EUR"));
    }

    #[test]
    fn test_change_failure_keeps_coin_and_status() {
        let products = vec![Product {
            id: "1".to_string(),
            name: "Token".to_string(),
            quantity: 5,
            price_cents: 4,
        }];
        let coins = [10, 5, 2].map(Money::from_cents);
        let mut s = VendingSession::new(products, ChangeCalculator::new(&coins).unwrap());
        let config = ConfigState::default();
        let mut out = Vec::new();

        run_loop(
            &mut s,
            &config,
            "select 1\ncoin 0.10\nstatus\ncoin 0.05\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Inserted 0.10EUR (total 0.10EUR, bill 0.04EUR)\nUnable to compute change\n"));
        assert!(out.contains("Inserted: 0.10EUR\nBill: 0.04EUR\nBasket:\n  [1x] Token 0.04EUR\nUnable to compute change\n"));
        assert!(!out.contains("error: Unable to compute change"));
        assert!(out.contains("error: Bill already paid"));
        assert_eq!(s.tendered(), Money::from_cents(10));
    }

    #[test]
    fn test_quit_stops_reading() {
        let out = run("quit\nselect 1\n");
        assert!(out.is_empty());
    }
}
