//! Pricing Service - company configuration, calculator runs and products
//!
//! Sits between the HTTP handlers and the [`PricingStore`]. Every pricing
//! figure that gets persisted is computed here from the submitted inputs;
//! results sent by a client are never stored as-is.

use rust_decimal::Decimal;
use shared::models::{
    Calculation, CalculationCreate, Company, CompanyCreate, CompanyRates, Expense, ExpenseCreate,
    PriceDriver, PricingInput, PricingResult, Product, ProductCreate, ProductUpdate, Revenue,
    RevenueCreate, Tax, TaxCreate,
};
use shared::util::{now_millis, snowflake_id};
use std::sync::Arc;

use crate::db::{PricingStore, RepoError};
use crate::pricing::{PricingCalculator, aggregation, round_money, round_percent};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text, validate_text_len,
};
use crate::utils::{AppError, ErrorCode, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct PricingService {
    store: Arc<dyn PricingStore>,
}

impl std::fmt::Debug for PricingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingService").finish_non_exhaustive()
    }
}

impl PricingService {
    pub fn new(store: Arc<dyn PricingStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Companies
    // =========================================================================

    pub async fn create_company(&self, data: CompanyCreate) -> ServiceResult<Company> {
        let name = required_text(&data.name, "name", MAX_NAME_LEN)?;
        let company = Company {
            id: snowflake_id(),
            name,
            created_at: now_millis(),
        };

        let company = self
            .store
            .create_company(company)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(msg) => {
                    ServiceError::App(AppError::with_message(ErrorCode::CompanyNameExists, msg))
                }
                other => ServiceError::Repo(other),
            })?;
        tracing::info!(company_id = company.id, name = %company.name, "Company created");
        Ok(company)
    }

    pub async fn list_companies(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.store.list_companies().await?)
    }

    pub async fn get_company(&self, company_id: i64) -> ServiceResult<Company> {
        self.store.find_company(company_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CompanyNotFound,
                format!("Company {} not found", company_id),
            )
            .into()
        })
    }

    // =========================================================================
    // Expenses / Revenues / Taxes
    // =========================================================================

    pub async fn list_expenses(&self, company_id: i64) -> ServiceResult<Vec<Expense>> {
        self.get_company(company_id).await?;
        Ok(self.store.load_expenses(company_id).await?)
    }

    pub async fn create_expense(
        &self,
        company_id: i64,
        data: ExpenseCreate,
    ) -> ServiceResult<Expense> {
        self.get_company(company_id).await?;
        require_non_negative("value", data.value)?;

        let expense = Expense {
            id: snowflake_id(),
            company_id,
            description: required_text(&data.description, "description", MAX_NOTE_LEN)?,
            value: data.value,
            kind: data.kind,
            created_at: now_millis(),
        };
        Ok(self.store.create_expense(expense).await?)
    }

    pub async fn delete_expense(&self, company_id: i64, id: i64) -> ServiceResult<()> {
        if self.store.delete_expense(company_id, id).await? {
            Ok(())
        } else {
            Err(not_found(ErrorCode::ExpenseNotFound, "Expense", id))
        }
    }

    pub async fn list_revenues(&self, company_id: i64) -> ServiceResult<Vec<Revenue>> {
        self.get_company(company_id).await?;
        Ok(self.store.load_revenues(company_id).await?)
    }

    pub async fn create_revenue(
        &self,
        company_id: i64,
        data: RevenueCreate,
    ) -> ServiceResult<Revenue> {
        self.get_company(company_id).await?;
        require_non_negative("value", data.value)?;
        validate_text_len(&data.description, "description", MAX_NOTE_LEN)?;

        let revenue = Revenue {
            id: snowflake_id(),
            company_id,
            description: data.description.trim().to_string(),
            value: data.value,
            period: data.period,
            created_at: now_millis(),
        };
        self.store.create_revenue(revenue).await.map_err(|e| match e {
            RepoError::Duplicate(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::MonthlyRevenueExists, msg))
            }
            other => ServiceError::Repo(other),
        })
    }

    pub async fn delete_revenue(&self, company_id: i64, id: i64) -> ServiceResult<()> {
        if self.store.delete_revenue(company_id, id).await? {
            Ok(())
        } else {
            Err(not_found(ErrorCode::RevenueNotFound, "Revenue", id))
        }
    }

    pub async fn list_taxes(&self, company_id: i64) -> ServiceResult<Vec<Tax>> {
        self.get_company(company_id).await?;
        Ok(self.store.load_taxes(company_id).await?)
    }

    pub async fn create_tax(&self, company_id: i64, data: TaxCreate) -> ServiceResult<Tax> {
        self.get_company(company_id).await?;
        require_non_negative("rate", data.rate)?;

        let tax = Tax {
            id: snowflake_id(),
            company_id,
            tax_type: data.tax_type,
            rate: data.rate,
            created_at: now_millis(),
        };
        Ok(self.store.create_tax(tax).await?)
    }

    pub async fn delete_tax(&self, company_id: i64, id: i64) -> ServiceResult<()> {
        if self.store.delete_tax(company_id, id).await? {
            Ok(())
        } else {
            Err(not_found(ErrorCode::TaxNotFound, "Tax", id))
        }
    }

    // =========================================================================
    // Calculator
    // =========================================================================

    /// Expense and tax rates of a company, aggregated from its records
    pub async fn company_rates(&self, company_id: i64) -> ServiceResult<CompanyRates> {
        self.get_company(company_id).await?;
        let expenses = self.store.load_expenses(company_id).await?;
        let revenues = self.store.load_revenues(company_id).await?;
        let taxes = self.store.load_taxes(company_id).await?;

        let rates = aggregation::aggregate(&expenses, &revenues, &taxes);
        if rates.monthly_revenue.is_zero() && !expenses.is_empty() {
            tracing::warn!(
                company_id,
                "Company has expenses but no monthly revenue, expense rates are zero"
            );
        }
        Ok(rates)
    }

    /// Run the calculator with the company's configured rates
    pub async fn quote(&self, company_id: i64, input: PricingInput) -> ServiceResult<PricingResult> {
        let rates = self.company_rates(company_id).await?;
        let input = input.with_company_rates(&rates);
        input.validate()?;
        Ok(PricingCalculator::suggest(&input))
    }

    /// Recompute and store a calculator run
    pub async fn save_calculation(
        &self,
        company_id: i64,
        data: CalculationCreate,
    ) -> ServiceResult<Calculation> {
        let name = required_text(&data.name, "name", MAX_NAME_LEN)?;
        let input = if data.use_company_rates {
            let rates = self.company_rates(company_id).await?;
            data.input.with_company_rates(&rates)
        } else {
            self.get_company(company_id).await?;
            data.input
        };
        input.validate()?;

        let calculation = Calculation {
            id: snowflake_id(),
            company_id,
            name,
            input,
            result: PricingCalculator::suggest(&input),
            created_at: now_millis(),
        };
        self.store.save_calculation(calculation.clone()).await?;
        tracing::info!(
            company_id,
            calculation_id = calculation.id,
            sales_price = %calculation.result.sales_price,
            "Calculation saved"
        );
        Ok(calculation)
    }

    pub async fn list_calculations(&self, company_id: i64) -> ServiceResult<Vec<Calculation>> {
        self.get_company(company_id).await?;
        Ok(self.store.list_calculations(company_id).await?)
    }

    pub async fn get_calculation(&self, company_id: i64, id: i64) -> ServiceResult<Calculation> {
        self.store
            .find_calculation(company_id, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::CalculationNotFound, "Calculation", id))
    }

    pub async fn delete_calculation(&self, company_id: i64, id: i64) -> ServiceResult<()> {
        if self.store.delete_calculation(company_id, id).await? {
            Ok(())
        } else {
            Err(not_found(ErrorCode::CalculationNotFound, "Calculation", id))
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn save_product(
        &self,
        company_id: i64,
        data: ProductCreate,
    ) -> ServiceResult<Product> {
        self.get_company(company_id).await?;
        let name = required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        let input = data.pricing_input();
        let result = price_product(&input, data.driver)?;

        let now = now_millis();
        let product = Product {
            id: snowflake_id(),
            company_id,
            name,
            sku: normalize_sku(data.sku),
            cost_price: round_money(input.cost_price),
            icms_purchase: input.acquisition_tax_rates.icms_purchase,
            ipi_purchase: input.acquisition_tax_rates.ipi_purchase,
            freight: round_money(input.freight),
            other_costs: round_money(input.other_costs),
            total_cost: result.total_cost,
            markup_percent: stored_markup(&result),
            profit_margin: result.profit_margin,
            sales_price: result.sales_price,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.store.save_product(product.clone()).await?;
        tracing::info!(
            company_id,
            product_id = product.id,
            sales_price = %product.sales_price,
            "Product created"
        );
        Ok(product)
    }

    /// Apply changes and reprice
    ///
    /// Without a driver the stored markup is kept and the price follows the
    /// new cost. A product without a markup (priced over zero cost) keeps its
    /// price instead.
    pub async fn update_product(
        &self,
        company_id: i64,
        id: i64,
        data: ProductUpdate,
    ) -> ServiceResult<Product> {
        let mut product = self.get_product(company_id, id).await?;

        if let Some(name) = &data.name {
            product.name = required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        if data.sku.is_some() {
            product.sku = normalize_sku(data.sku);
        }
        if let Some(is_active) = data.is_active {
            product.is_active = is_active;
        }
        product.cost_price = data.cost_price.unwrap_or(product.cost_price);
        product.icms_purchase = data.icms_purchase.unwrap_or(product.icms_purchase);
        product.ipi_purchase = data.ipi_purchase.unwrap_or(product.ipi_purchase);
        product.freight = data.freight.unwrap_or(product.freight);
        product.other_costs = data.other_costs.unwrap_or(product.other_costs);

        let input = product.pricing_input();
        let driver = data.driver.unwrap_or_else(|| {
            product
                .markup_percent
                .map_or(PriceDriver::Price(product.sales_price), PriceDriver::Markup)
        });
        let result = price_product(&input, driver)?;

        product.cost_price = round_money(product.cost_price);
        product.freight = round_money(product.freight);
        product.other_costs = round_money(product.other_costs);
        product.total_cost = result.total_cost;
        product.markup_percent = stored_markup(&result);
        product.profit_margin = result.profit_margin;
        product.sales_price = result.sales_price;
        product.updated_at = now_millis();

        let product = self.store.update_product(product).await?;
        tracing::info!(company_id, product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn list_products(&self, company_id: i64) -> ServiceResult<Vec<Product>> {
        self.get_company(company_id).await?;
        Ok(self.store.list_products(company_id).await?)
    }

    pub async fn get_product(&self, company_id: i64, id: i64) -> ServiceResult<Product> {
        self.store
            .find_product(company_id, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::ProductNotFound, "Product", id))
    }

    pub async fn delete_product(&self, company_id: i64, id: i64) -> ServiceResult<()> {
        if self.store.delete_product(company_id, id).await? {
            Ok(())
        } else {
            Err(not_found(ErrorCode::ProductNotFound, "Product", id))
        }
    }
}

/// Validate and reprice a product; a product must end up with a defined price
fn price_product(input: &PricingInput, driver: PriceDriver) -> ServiceResult<PricingResult> {
    input.validate()?;
    driver.validate()?;

    let result = PricingCalculator::recalculate(input, driver);
    if !result.is_computable() {
        let issues = serde_json::to_value(&result.issues).unwrap_or_default();
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            "Sales price is undefined for the given inputs",
        )
        .with_detail("issues", issues)
        .into());
    }
    Ok(result)
}

fn stored_markup(result: &PricingResult) -> Option<Decimal> {
    result.markup.map(|markup| round_percent(markup.percent()))
}

fn required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    validate_required_text(value, field, max_len)?;
    Ok(value.trim().to_string())
}

fn require_non_negative(field: &str, value: Decimal) -> Result<(), AppError> {
    if value < Decimal::ZERO {
        return Err(AppError::out_of_range(
            field,
            format!("{} must not be negative, got {}", field, value),
        ));
    }
    Ok(())
}

fn normalize_sku(sku: Option<String>) -> Option<String> {
    sku.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn not_found(code: ErrorCode, resource: &str, id: i64) -> ServiceError {
    AppError::with_message(code, format!("{} {} not found", resource, id))
        .with_detail("id", id)
        .into()
}
