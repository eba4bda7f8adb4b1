//! # Storefront Entry Point
//!
//! ```text
//! main.rs ────► storefront::run()
//!                 │
//!                 ├── config + logging
//!                 ├── Storefront (shared stores)
//!                 └── Shell loop on stdin/stdout
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    storefront::run()
}
