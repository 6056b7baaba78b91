//! Service layer

pub mod pricing_service;

pub use pricing_service::PricingService;
