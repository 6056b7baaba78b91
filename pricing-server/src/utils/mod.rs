//! Utilities
//!
//! - [`error`]: `AppError` re-exports and the service error bridge
//! - [`logger`]: tracing subscriber setup
//! - [`validation`]: text length limits and checks

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ServiceError, ServiceResult};
