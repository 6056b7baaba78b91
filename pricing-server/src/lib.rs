//! Pricing Server - markup and sales price calculator for small businesses
//!
//! # Module structure
//!
//! ```text
//! pricing-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── pricing/       # formula engine, rate aggregation, calculator
//! ├── db/            # storage contract + in-memory store
//! ├── services/      # pricing service (validation, repricing, persistence)
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # error bridge, logger
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

pub use self::core::{Config, ConfigError, Server, ServerError, ServerState};
pub use pricing::PricingCalculator;
pub use services::PricingService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Result<Config, ConfigError> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}
