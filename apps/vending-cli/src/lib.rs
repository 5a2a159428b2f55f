//! # Vending CLI Library
//!
//! Terminal front-end for the vending machine.
//!
//! ## Module Organization
//! ```text
//! vending_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── catalog.rs      ◄─── JSON catalog loading
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & loop
//! │   ├── session.rs  ◄─── Select / coin / status / reset
//! │   └── settings.rs ◄─── Catalog replacement
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vending_core::{ChangeStrategy, VendingSession};

use state::ConfigState;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "vending", version, about = "Vending machine with change calculation")]
pub struct Cli {
    /// Config file (defaults to ./vending.toml when present)
    #[arg(long, env = "VENDING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog JSON file, overrides `catalog_path`
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Change strategy: greedy or minimum_coins
    #[arg(long)]
    pub strategy: Option<ChangeStrategy>,
}

/// Runs the machine on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Machine Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ── stderr, RUST_LOG or info,vending=debug        │
/// │  2. Load Configuration ── defaults → vending.toml → VENDING_* → flags   │
/// │  3. Build Calculator ──── coin set + strategy                           │
/// │  4. Load Catalog ──────── empty catalog: "No products available!"       │
/// │  5. Command Loop ──────── one command per line until quit or EOF        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let mut config = ConfigState::load(cli.config.as_deref()).context("Loading configuration")?;
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }
    if let Some(strategy) = cli.strategy {
        config.change_strategy = strategy;
    }

    info!(
        machine = %config.machine_name,
        currency = %config.currency,
        strategy = %config.change_strategy,
        "Starting vending machine"
    );

    let calculator = config.calculator().context("Building change calculator")?;
    let products = catalog::load_catalog(&config.catalog_path)
        .with_context(|| format!("Loading catalog {}", config.catalog_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if products.is_empty() {
        writeln!(out, "No products available!")?;
        return Ok(());
    }

    let mut session = VendingSession::new(products, calculator);

    writeln!(out, "{}", config.machine_name)?;
    for line in commands::session::list_products(&session, &config) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    let stdin = io::stdin();
    commands::run_loop(&mut session, &config, stdin.lock(), out)?;

    info!("Machine stopped");
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=off` - Silence logging
/// - Default: `info,vending=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vending=debug"));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
