//! # Storefront Application Library
//!
//! Core library for the storefront terminal application.
//! This is the main entry point that loads configuration and runs the shell.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── session.rs  ◄─── Signed-in user, cart, admin table state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── Login, logout, navigation
//! │   ├── admin.rs    ◄─── Inventory console commands
//! │   └── shop.rs     ◄─── Cart and checkout commands
//! ├── routing.rs      ◄─── Role → view dispatch
//! ├── shell.rs        ◄─── Line parsing and the read loop
//! ├── render.rs       ◄─── Tables
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod routing;
pub mod shell;
pub mod state;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::ConfigState;
use storefront_store::{seed, Storefront};

/// Launch flags.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Terminal storefront with admin console")]
pub struct LaunchArgs {
    /// Config file (TOML)
    #[arg(long, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with an empty catalog and no coupons
    #[arg(long)]
    pub no_seed: bool,

    /// Print every result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse launch flags (clap)                                           │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env                     │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else the configured filter                              │
/// │     • Written to stderr so stdout stays clean                           │
/// │                                                                         │
/// │  4. Build the Storefront ─────────────────────────────────────────────► │
/// │     • Sample catalog and coupon unless seeding is off                   │
/// │     • Sample accounts always                                            │
/// │                                                                         │
/// │  5. Run the shell on stdin/stdout until quit or EOF                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let args = LaunchArgs::parse();

    let config = match ConfigState::load(args.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("storefront: {err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);
    info!(store = %config.store_name, "Starting storefront");

    let store = match build_store(config.seed && !args.no_seed) {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "Failed to build storefront");
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new(store, config).with_json(args.json);
    let stdin = io::stdin();
    match shell.run(stdin.lock(), io::stdout().lock()) {
        Ok(()) => {
            info!("Storefront stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Shell I/O failed");
            ExitCode::FAILURE
        }
    }
}

/// Creates the storefront, with or without sample data.
pub fn build_store(seed_data: bool) -> storefront_core::CoreResult<Storefront> {
    if seed_data {
        Storefront::seeded()
    } else {
        Ok(Storefront::with_users(seed::sample_users()))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_store=trace` - Trace the store only
/// - Default: the config's `log_filter` (`info,storefront=debug`)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(state::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_store_without_seed_keeps_accounts() {
        let store = build_store(false).unwrap();
        assert!(store.catalog().is_empty());
        assert!(store.coupons().is_empty());
        assert!(store.users().authenticate("admin", "admin").is_ok());
    }

    #[test]
    fn test_launch_args() {
        let args = LaunchArgs::try_parse_from(["storefront", "--no-seed", "--json"]).unwrap();
        assert!(args.no_seed);
        assert!(args.json);
    }
}
