//! Data models
//!
//! Shared between the pricing server and its API clients.
//! All IDs are `i64` snowflake ids, timestamps are epoch milliseconds and
//! money/percentages are `rust_decimal::Decimal` (serialized as JSON numbers).

pub mod calculation;
pub mod company;
pub mod expense;
pub mod pricing;
pub mod product;
pub mod revenue;
pub mod serde_helpers;
pub mod tax;

// Re-exports
pub use calculation::*;
pub use company::*;
pub use expense::*;
pub use pricing::*;
pub use product::*;
pub use revenue::*;
pub use tax::*;
