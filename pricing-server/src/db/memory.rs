//! In-memory store
//!
//! One `parking_lot::RwLock<HashMap>` per table. Locks are never held across
//! an `.await`; every trait method does its work synchronously.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{Calculation, Company, Expense, Product, Revenue, RevenuePeriod, Tax};
use std::collections::HashMap;

use super::{PricingStore, RepoError, RepoResult};

/// Row owned by a company
trait CompanyScoped: Clone {
    fn id(&self) -> i64;
    fn company_id(&self) -> i64;
}

macro_rules! company_scoped {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CompanyScoped for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn company_id(&self) -> i64 {
                    self.company_id
                }
            }
        )*
    };
}

company_scoped!(Expense, Revenue, Tax, Calculation, Product);

struct Table<T> {
    name: &'static str,
    rows: RwLock<HashMap<i64, T>>,
}

impl<T: CompanyScoped> Table<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Rows of one company, oldest first (snowflake ids are time ordered)
    fn list(&self, company_id: i64) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .read()
            .values()
            .filter(|row| row.company_id() == company_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.id());
        rows
    }

    fn find(&self, company_id: i64, id: i64) -> Option<T> {
        self.rows
            .read()
            .get(&id)
            .filter(|row| row.company_id() == company_id)
            .cloned()
    }

    fn insert_into(&self, rows: &mut HashMap<i64, T>, row: T) -> RepoResult<T> {
        if rows.contains_key(&row.id()) {
            return Err(RepoError::IdCollision(format!("{} {}", self.name, row.id())));
        }
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn insert(&self, row: T) -> RepoResult<T> {
        let mut rows = self.rows.write();
        self.insert_into(&mut rows, row)
    }

    fn replace(&self, row: T) -> RepoResult<T> {
        let mut rows = self.rows.write();
        match rows.get_mut(&row.id()) {
            Some(existing) if existing.company_id() == row.company_id() => {
                *existing = row.clone();
                Ok(row)
            }
            _ => Err(RepoError::NotFound(format!("{} {}", self.name, row.id()))),
        }
    }

    fn delete(&self, company_id: i64, id: i64) -> bool {
        let mut rows = self.rows.write();
        match rows.get(&id) {
            Some(row) if row.company_id() == company_id => rows.remove(&id).is_some(),
            _ => false,
        }
    }
}

/// Process-local [`PricingStore`]
pub struct InMemoryStore {
    companies: RwLock<HashMap<i64, Company>>,
    expenses: Table<Expense>,
    revenues: Table<Revenue>,
    taxes: Table<Tax>,
    calculations: Table<Calculation>,
    products: Table<Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
            expenses: Table::new("expense"),
            revenues: Table::new("revenue"),
            taxes: Table::new("tax"),
            calculations: Table::new("calculation"),
            products: Table::new("product"),
        }
    }

    fn require_company(&self, company_id: i64) -> RepoResult<()> {
        if self.companies.read().contains_key(&company_id) {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("company {}", company_id)))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingStore for InMemoryStore {
    // ========== Companies ==========

    async fn create_company(&self, company: Company) -> RepoResult<Company> {
        let name = company.name.trim();
        if name.is_empty() {
            return Err(RepoError::Validation("company name is empty".into()));
        }

        let mut companies = self.companies.write();
        if companies
            .values()
            .any(|c| c.name.trim().eq_ignore_ascii_case(name))
        {
            return Err(RepoError::Duplicate(format!("company name '{}'", name)));
        }
        if companies.contains_key(&company.id) {
            return Err(RepoError::IdCollision(format!("company {}", company.id)));
        }
        companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn find_company(&self, id: i64) -> RepoResult<Option<Company>> {
        Ok(self.companies.read().get(&id).cloned())
    }

    async fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut companies: Vec<Company> = self.companies.read().values().cloned().collect();
        companies.sort_by_key(|c| c.id);
        Ok(companies)
    }

    // ========== Expenses ==========

    async fn load_expenses(&self, company_id: i64) -> RepoResult<Vec<Expense>> {
        Ok(self.expenses.list(company_id))
    }

    async fn create_expense(&self, expense: Expense) -> RepoResult<Expense> {
        self.require_company(expense.company_id)?;
        self.expenses.insert(expense)
    }

    async fn delete_expense(&self, company_id: i64, id: i64) -> RepoResult<bool> {
        Ok(self.expenses.delete(company_id, id))
    }

    // ========== Revenues ==========

    async fn load_revenues(&self, company_id: i64) -> RepoResult<Vec<Revenue>> {
        Ok(self.revenues.list(company_id))
    }

    async fn create_revenue(&self, revenue: Revenue) -> RepoResult<Revenue> {
        self.require_company(revenue.company_id)?;

        // Check and insert under one write lock
        let mut rows = self.revenues.rows.write();
        if revenue.period == RevenuePeriod::Monthly
            && rows.values().any(|r| {
                r.company_id == revenue.company_id && r.period == RevenuePeriod::Monthly
            })
        {
            return Err(RepoError::Duplicate(format!(
                "monthly revenue of company {}",
                revenue.company_id
            )));
        }
        self.revenues.insert_into(&mut rows, revenue)
    }

    async fn delete_revenue(&self, company_id: i64, id: i64) -> RepoResult<bool> {
        Ok(self.revenues.delete(company_id, id))
    }

    // ========== Taxes ==========

    async fn load_taxes(&self, company_id: i64) -> RepoResult<Vec<Tax>> {
        Ok(self.taxes.list(company_id))
    }

    async fn create_tax(&self, tax: Tax) -> RepoResult<Tax> {
        self.require_company(tax.company_id)?;
        self.taxes.insert(tax)
    }

    async fn delete_tax(&self, company_id: i64, id: i64) -> RepoResult<bool> {
        Ok(self.taxes.delete(company_id, id))
    }

    // ========== Calculations ==========

    async fn save_calculation(&self, calculation: Calculation) -> RepoResult<i64> {
        self.require_company(calculation.company_id)?;
        self.calculations.insert(calculation).map(|c| c.id)
    }

    async fn list_calculations(&self, company_id: i64) -> RepoResult<Vec<Calculation>> {
        Ok(self.calculations.list(company_id))
    }

    async fn find_calculation(
        &self,
        company_id: i64,
        id: i64,
    ) -> RepoResult<Option<Calculation>> {
        Ok(self.calculations.find(company_id, id))
    }

    async fn delete_calculation(&self, company_id: i64, id: i64) -> RepoResult<bool> {
        Ok(self.calculations.delete(company_id, id))
    }

    // ========== Products ==========

    async fn save_product(&self, product: Product) -> RepoResult<i64> {
        self.require_company(product.company_id)?;
        self.products.insert(product).map(|p| p.id)
    }

    async fn list_products(&self, company_id: i64) -> RepoResult<Vec<Product>> {
        Ok(self.products.list(company_id))
    }

    async fn find_product(&self, company_id: i64, id: i64) -> RepoResult<Option<Product>> {
        Ok(self.products.find(company_id, id))
    }

    async fn update_product(&self, product: Product) -> RepoResult<Product> {
        self.products.replace(product)
    }

    async fn delete_product(&self, company_id: i64, id: i64) -> RepoResult<bool> {
        Ok(self.products.delete(company_id, id))
    }
}
