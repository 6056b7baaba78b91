//! Pricing Model
//!
//! Transient input/output records of the markup calculator. A
//! [`PricingInput`] is built fresh for every recalculation and never stored on
//! its own; the chosen [`PricingResult`] figures are persisted through a
//! calculation or product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use super::serde_helpers::lenient_decimal;
use super::tax::TaxType;
use crate::error::{AppError, AppResult};

/// Taxes paid on purchase, compounded into the unit cost (percent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionTaxRates {
    #[serde(deserialize_with = "lenient_decimal")]
    pub icms_purchase: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub ipi_purchase: Decimal,
}

/// Taxes levied on the final sale price (percent of price)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesTaxRates {
    #[serde(deserialize_with = "lenient_decimal")]
    pub icms: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub pis: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub cofins: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub cpp: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub issqn: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub csll: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub irpj: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub tax_others: Decimal,
}

impl SalesTaxRates {
    /// Build from per-type totals (see the aggregation of configured taxes)
    pub fn from_rates_by_type(rates: &BTreeMap<TaxType, Decimal>) -> Self {
        let rate = |tax_type: TaxType| rates.get(&tax_type).copied().unwrap_or_default();
        Self {
            icms: rate(TaxType::Icms),
            pis: rate(TaxType::Pis),
            cofins: rate(TaxType::Cofins),
            cpp: rate(TaxType::Cpp),
            issqn: rate(TaxType::Issqn),
            csll: rate(TaxType::Csll),
            irpj: rate(TaxType::Irpj),
            tax_others: rate(TaxType::Others),
        }
    }

    /// Named view of every rate, in declaration order
    pub fn fields(&self) -> [(&'static str, Decimal); 8] {
        [
            ("icms", self.icms),
            ("pis", self.pis),
            ("cofins", self.cofins),
            ("cpp", self.cpp),
            ("issqn", self.issqn),
            ("csll", self.csll),
            ("irpj", self.irpj),
            ("tax_others", self.tax_others),
        ]
    }

    /// Sum of all sales tax rates, saturating at `Decimal::MAX`
    pub fn total(&self) -> Decimal {
        self.fields()
            .iter()
            .fold(Decimal::ZERO, |total, (_, rate)| total.saturating_add(*rate))
    }
}

/// Aggregated rates of one company (expenses over monthly revenue, taxes by type)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRates {
    pub monthly_revenue: Decimal,
    pub fixed_expense_rate: Decimal,
    pub variable_expense_rate: Decimal,
    pub sales_tax_rates: SalesTaxRates,
    pub total_sales_tax_rate: Decimal,
}

/// Calculator input
///
/// Every field is optional on the wire; absent, null or non-numeric values
/// are read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingInput {
    #[serde(deserialize_with = "lenient_decimal")]
    pub cost_price: Decimal,
    pub acquisition_tax_rates: AcquisitionTaxRates,
    #[serde(deserialize_with = "lenient_decimal")]
    pub freight: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub other_costs: Decimal,
    pub sales_tax_rates: SalesTaxRates,
    #[serde(deserialize_with = "lenient_decimal")]
    pub fixed_expense_rate: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub variable_expense_rate: Decimal,
    /// Desired profit margin (percent of price). May be negative.
    #[serde(deserialize_with = "lenient_decimal")]
    pub desired_profit_margin: Decimal,
}

impl PricingInput {
    /// Replace expense and sales tax rates with the company's configured ones
    pub fn with_company_rates(mut self, rates: &CompanyRates) -> Self {
        self.fixed_expense_rate = rates.fixed_expense_rate;
        self.variable_expense_rate = rates.variable_expense_rate;
        self.sales_tax_rates = rates.sales_tax_rates;
        self
    }

    /// Reject negative costs and rates
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("cost_price", self.cost_price),
            ("icms_purchase", self.acquisition_tax_rates.icms_purchase),
            ("ipi_purchase", self.acquisition_tax_rates.ipi_purchase),
            ("freight", self.freight),
            ("other_costs", self.other_costs),
            ("fixed_expense_rate", self.fixed_expense_rate),
            ("variable_expense_rate", self.variable_expense_rate),
        ];

        fields
            .iter()
            .chain(self.sales_tax_rates.fields().iter())
            .try_for_each(|(name, value)| require_non_negative(name, *value))
    }
}

fn require_non_negative(field: &str, value: Decimal) -> AppResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::out_of_range(
            field,
            format!("{} must not be negative, got {}", field, value),
        ));
    }
    Ok(())
}

/// The field the user edited last; the other two are derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PriceDriver {
    /// Markup over total cost, in percent
    Markup(#[serde(deserialize_with = "lenient_decimal")] Decimal),
    /// Profit margin over sales price, in percent
    Margin(#[serde(deserialize_with = "lenient_decimal")] Decimal),
    /// Sales price
    Price(#[serde(deserialize_with = "lenient_decimal")] Decimal),
}

impl PriceDriver {
    /// Markup and price drivers must not be negative; margin may be
    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Markup(value) => require_non_negative("markup", *value),
            Self::Price(value) => require_non_negative("sales_price", *value),
            Self::Margin(_) => Ok(()),
        }
    }
}

/// Markup of a price over its total cost
///
/// Stored as a multiplier (`price / cost`). The calculator reports it as a
/// multiplier and product forms as a percentage; both views are exposed and
/// both are serialized so clients never have to guess which one they got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Markup {
    multiplier: Decimal,
}

impl Markup {
    pub fn from_multiplier(multiplier: Decimal) -> Self {
        Self { multiplier }
    }

    /// `50` (percent) becomes a multiplier of `1.5`
    pub fn from_percent(percent: Decimal) -> Self {
        Self {
            multiplier: Decimal::ONE.saturating_add(percent / Decimal::ONE_HUNDRED),
        }
    }

    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    /// Saturates for multipliers too large to express as a percentage
    pub fn percent(&self) -> Decimal {
        self.multiplier
            .saturating_sub(Decimal::ONE)
            .saturating_mul(Decimal::ONE_HUNDRED)
    }
}

#[derive(Serialize, Deserialize)]
struct MarkupRepr {
    #[serde(default)]
    multiplier: Option<Decimal>,
    #[serde(default)]
    percent: Option<Decimal>,
}

impl Serialize for Markup {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MarkupRepr {
            multiplier: Some(self.multiplier()),
            percent: Some(self.percent()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Markup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = MarkupRepr::deserialize(deserializer)?;
        match (repr.multiplier, repr.percent) {
            (Some(multiplier), _) => Ok(Markup::from_multiplier(multiplier)),
            (None, Some(percent)) => Ok(Markup::from_percent(percent)),
            (None, None) => Err(serde::de::Error::custom(
                "markup needs either `multiplier` or `percent`",
            )),
        }
    }
}

/// Guarded conditions of the formula engine
///
/// None of these is a fault: the calculator turns each into a zero sentinel
/// plus an entry in [`PricingResult::issues`].
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingError {
    #[error("profit margin of {margin_percent}% leaves no room for cost")]
    DegenerateMargin { margin_percent: Decimal },

    #[error("deductions of {deduction_rate}% consume the whole sales price")]
    DeductionRateOverflow { deduction_rate: Decimal },

    #[error("markup is not computable when total cost is zero")]
    ZeroCost,

    #[error("margin is not computable when sales price is zero")]
    ZeroPrice,
}

impl PricingError {
    /// Whether the sales price itself is undefined (as opposed to a derived ratio)
    pub fn makes_price_undefined(&self) -> bool {
        matches!(
            self,
            Self::DegenerateMargin { .. } | Self::DeductionRateOverflow { .. }
        )
    }
}

/// Calculator output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub total_cost: Decimal,
    pub total_sales_tax_rate: Decimal,
    pub total_deduction_rate: Decimal,
    /// Zero when the price is undefined
    pub sales_price: Decimal,
    /// `None` when not computable
    pub markup: Option<Markup>,
    /// Percent of sales price; `None` when not computable
    pub profit_margin: Option<Decimal>,
    #[serde(default)]
    pub issues: Vec<PricingError>,
}

impl PricingResult {
    /// True unless the sales price is undefined
    pub fn is_computable(&self) -> bool {
        !self.issues.iter().any(PricingError::makes_price_undefined)
    }

    /// Markup multiplier, zero when not computable
    pub fn markup_multiplier(&self) -> Decimal {
        self.markup.map(|m| m.multiplier()).unwrap_or_default()
    }

    /// Markup percentage, zero when not computable
    pub fn markup_percent(&self) -> Decimal {
        self.markup.map(|m| m.percent()).unwrap_or_default()
    }

    /// Profit margin percentage, zero when not computable
    pub fn profit_margin_or_zero(&self) -> Decimal {
        self.profit_margin.unwrap_or_default()
    }
}
