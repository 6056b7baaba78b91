//! Unified error system for the pricing service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Company errors
//! - 4xxx: Finance errors (expenses, revenues, taxes)
//! - 6xxx: Catalog errors (products, calculations)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::CompanyNotFound);
//!
//! let err = AppError::out_of_range("cost_price", "cost_price must not be negative")
//!     .with_detail("value", -1.5);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(8));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
