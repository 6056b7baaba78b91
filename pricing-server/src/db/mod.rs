//! Persistence Module
//!
//! [`PricingStore`] is the storage contract the service layer depends on.
//! Every record is scoped to a company: lookups and deletes take the owning
//! company id and never see another tenant's rows.
//!
//! [`InMemoryStore`] implements it with lock-guarded maps.

pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use shared::models::{Calculation, Company, Expense, Product, Revenue, Tax};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// A generated id is already taken
    #[error("Id collision: {0}")]
    IdCollision(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Storage contract of the pricing service
///
/// Entities arrive fully built (ids and timestamps assigned by the caller).
/// `delete_*` returns whether a row was removed.
#[async_trait]
pub trait PricingStore: Send + Sync {
    // ========== Companies ==========
    async fn create_company(&self, company: Company) -> RepoResult<Company>;
    async fn find_company(&self, id: i64) -> RepoResult<Option<Company>>;
    async fn list_companies(&self) -> RepoResult<Vec<Company>>;

    // ========== Expenses ==========
    async fn load_expenses(&self, company_id: i64) -> RepoResult<Vec<Expense>>;
    async fn create_expense(&self, expense: Expense) -> RepoResult<Expense>;
    async fn delete_expense(&self, company_id: i64, id: i64) -> RepoResult<bool>;

    // ========== Revenues ==========
    async fn load_revenues(&self, company_id: i64) -> RepoResult<Vec<Revenue>>;
    /// Fails with `Duplicate` when the company already has a MONTHLY revenue
    async fn create_revenue(&self, revenue: Revenue) -> RepoResult<Revenue>;
    async fn delete_revenue(&self, company_id: i64, id: i64) -> RepoResult<bool>;

    // ========== Taxes ==========
    async fn load_taxes(&self, company_id: i64) -> RepoResult<Vec<Tax>>;
    async fn create_tax(&self, tax: Tax) -> RepoResult<Tax>;
    async fn delete_tax(&self, company_id: i64, id: i64) -> RepoResult<bool>;

    // ========== Calculations ==========
    async fn save_calculation(&self, calculation: Calculation) -> RepoResult<i64>;
    async fn list_calculations(&self, company_id: i64) -> RepoResult<Vec<Calculation>>;
    async fn find_calculation(&self, company_id: i64, id: i64)
    -> RepoResult<Option<Calculation>>;
    async fn delete_calculation(&self, company_id: i64, id: i64) -> RepoResult<bool>;

    // ========== Products ==========
    async fn save_product(&self, product: Product) -> RepoResult<i64>;
    async fn list_products(&self, company_id: i64) -> RepoResult<Vec<Product>>;
    async fn find_product(&self, company_id: i64, id: i64) -> RepoResult<Option<Product>>;
    /// Replace a stored product; `NotFound` if it does not exist for the company
    async fn update_product(&self, product: Product) -> RepoResult<Product>;
    async fn delete_product(&self, company_id: i64, id: i64) -> RepoResult<bool>;
}
