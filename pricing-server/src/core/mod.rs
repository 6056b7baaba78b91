//! Core - configuration, state, server and startup errors
//!
//! - [`Config`] - configuration from environment variables
//! - [`ServerState`] - state shared by all handlers
//! - [`Server`] - HTTP server
//! - [`ServerError`] - startup / serve errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, Environment};
pub use error::{ConfigError, Result, ServerError};
pub use server::Server;
pub use state::ServerState;
