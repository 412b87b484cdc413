//! WashAm Order Server
//!
//! Persistence and HTTP backend for a laundry pickup/delivery service.
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # Config, state, server lifecycle
//! ├── store/         # Embedded order store and secondary indexes
//! ├── api/           # HTTP routes and handlers
//! ├── notify/        # Order confirmation email delivery
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod notify;
pub mod store;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use notify::{NoopNotifier, Notifier, ResendNotifier};
pub use store::OrderStore;
pub use utils::{AppError, AppResult, ErrorResponse};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging. Called once at process start.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
