//! # State Module
//!
//! Application state for the storefront shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────────────────────────────┐   │
//! │  │   ConfigState    │   │               Session                    │   │
//! │  │                  │   │                                          │   │
//! │  │  store_name      │   │  user, view                              │   │
//! │  │  currency        │   │  CartEngine      (customers)             │   │
//! │  │  report window   │   │  AdminConsoleState (admins)              │   │
//! │  └──────────────────┘   │  Storefront handle ──► shared stores     │   │
//! │                         └──────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ConfigState: read-only after startup                                  │
//! │  Session: owned by one shell, mutated by one command at a time         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState, DEFAULT_LOG_FILTER};
pub use session::{AdminConsoleState, DeleteConfirmation, Session};
