//! Pricing Engine Module
//!
//! - [`engine`]: pure markup / margin / price formulas
//! - [`aggregation`]: company expense, revenue and tax records → rates
//! - [`PricingCalculator`]: runs the formulas over a `PricingInput`

pub mod aggregation;
mod calculator;
pub mod engine;

pub use calculator::*;
