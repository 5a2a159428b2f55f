//! # State Module
//!
//! Application state for the terminal machine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run()                                                                  │
//! │   ├── ConfigState      read-only after startup                         │
//! │   └── VendingSession   owned by the command loop, passed as &mut       │
//! │                                                                         │
//! │  Single user, single thread: no Arc, no Mutex.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{CoinConfig, ConfigError, ConfigState, DEFAULT_CONFIG_FILE, ENV_PREFIX};
