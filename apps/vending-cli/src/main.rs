//! # Vending Oasis Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging, stderr)
//! 3. Load configuration (defaults → TOML file → `VENDING_*` env)
//! 4. Load the product catalog
//! 5. Read commands from stdin until `quit` or EOF
//!
//! The actual setup is in lib.rs so integration tests can drive it.

fn main() -> anyhow::Result<()> {
    vending_cli::run()
}
