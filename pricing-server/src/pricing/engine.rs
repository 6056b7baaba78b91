//! Pricing Formula Engine
//!
//! Pure cost → markup → margin → price formulas on `Decimal`.
//!
//! Markup is measured over total cost, margin over sales price:
//!
//! ```text
//! markup% = (price - cost) / cost  × 100
//! margin% = (price - cost) / price × 100
//! ```
//!
//! Every division is guarded. Conditions where a figure is undefined come back
//! as [`PricingError`] values (or the zero sentinel of [`SuggestedPrice`]),
//! never as a panic or an infinite/NaN number.

use rust_decimal::prelude::*;
use shared::models::{Markup, PricingError};

/// Total acquisition cost of one unit
///
/// `cost × (1 + icms% + ipi%) + freight + other_costs`
pub fn compute_total_cost(
    cost_price: Decimal,
    icms_purchase: Decimal,
    ipi_purchase: Decimal,
    freight: Decimal,
    other_costs: Decimal,
) -> Decimal {
    let tax_factor = Decimal::ONE + percent(icms_purchase) + percent(ipi_purchase);
    cost_price
        .saturating_mul(tax_factor)
        .saturating_add(freight)
        .saturating_add(other_costs)
}

/// Sales price from a markup percentage over cost
pub fn price_from_markup(total_cost: Decimal, markup_percent: Decimal) -> Decimal {
    total_cost.saturating_mul(Decimal::ONE + percent(markup_percent))
}

/// Sales price that yields the given margin percentage
///
/// A margin of 100% or more would need an infinite (or negative) price.
pub fn price_from_margin(
    total_cost: Decimal,
    margin_percent: Decimal,
) -> Result<Decimal, PricingError> {
    let degenerate = || PricingError::DegenerateMargin { margin_percent };

    if margin_percent >= Decimal::ONE_HUNDRED {
        return Err(degenerate());
    }
    total_cost
        .checked_div(Decimal::ONE - percent(margin_percent))
        .ok_or_else(degenerate)
}

/// Markup percentage implied by a sales price
pub fn markup_percent_from_price(
    total_cost: Decimal,
    sales_price: Decimal,
) -> Result<Decimal, PricingError> {
    if total_cost.is_zero() {
        return Err(PricingError::ZeroCost);
    }
    sales_price
        .checked_sub(total_cost)
        .and_then(|gain| gain.checked_div(total_cost))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::ZeroCost)
}

/// Margin percentage implied by a sales price
pub fn margin_percent_from_price(
    total_cost: Decimal,
    sales_price: Decimal,
) -> Result<Decimal, PricingError> {
    if sales_price.is_zero() {
        return Err(PricingError::ZeroPrice);
    }
    sales_price
        .checked_sub(total_cost)
        .and_then(|gain| gain.checked_div(sales_price))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::ZeroPrice)
}

/// Markup and margin derived from a price; `None` where not computable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRatios {
    pub markup_percent: Option<Decimal>,
    pub margin_percent: Option<Decimal>,
}

impl PriceRatios {
    /// Guard conditions hit while deriving the ratios
    pub fn issues(&self) -> Vec<PricingError> {
        let mut issues = Vec::new();
        if self.markup_percent.is_none() {
            issues.push(PricingError::ZeroCost);
        }
        if self.margin_percent.is_none() {
            issues.push(PricingError::ZeroPrice);
        }
        issues
    }
}

/// Derive both ratios from a price (product form, price driver)
pub fn ratios_from_price(total_cost: Decimal, sales_price: Decimal) -> PriceRatios {
    PriceRatios {
        markup_percent: markup_percent_from_price(total_cost, sales_price).ok(),
        margin_percent: margin_percent_from_price(total_cost, sales_price).ok(),
    }
}

/// Share of the sales price consumed by expenses, taxes and profit (percent)
pub fn deduction_rate(
    fixed_expense_rate: Decimal,
    variable_expense_rate: Decimal,
    total_sales_tax_rate: Decimal,
    desired_profit_margin: Decimal,
) -> Decimal {
    fixed_expense_rate
        .saturating_add(variable_expense_rate)
        .saturating_add(total_sales_tax_rate)
        .saturating_add(desired_profit_margin)
}

/// Outcome of the deduction-rate price formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuggestedPrice {
    Priced { sales_price: Decimal, markup: Markup },
    /// Deductions take 100% or more of the price
    Undefined { deduction_rate: Decimal },
}

impl SuggestedPrice {
    /// Sales price, zero when undefined
    pub fn sales_price(&self) -> Decimal {
        match self {
            Self::Priced { sales_price, .. } => *sales_price,
            Self::Undefined { .. } => Decimal::ZERO,
        }
    }

    /// Markup, zero multiplier when undefined
    pub fn markup(&self) -> Markup {
        match self {
            Self::Priced { markup, .. } => *markup,
            Self::Undefined { .. } => Markup::default(),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Priced { .. })
    }

    pub fn issue(&self) -> Option<PricingError> {
        match self {
            Self::Priced { .. } => None,
            Self::Undefined { deduction_rate } => Some(PricingError::DeductionRateOverflow {
                deduction_rate: *deduction_rate,
            }),
        }
    }
}

/// Suggested sales price: `cost / (1 - deduction%)`
///
/// The markup multiplier is `price / cost`, zero when cost is zero.
pub fn suggested_price(total_cost: Decimal, deduction_rate: Decimal) -> SuggestedPrice {
    let undefined = SuggestedPrice::Undefined { deduction_rate };

    if deduction_rate >= Decimal::ONE_HUNDRED {
        return undefined;
    }
    let Some(sales_price) = total_cost.checked_div(Decimal::ONE - percent(deduction_rate)) else {
        return undefined;
    };

    let multiplier = if total_cost.is_zero() {
        Decimal::ZERO
    } else {
        sales_price.checked_div(total_cost).unwrap_or_default()
    };

    SuggestedPrice::Priced {
        sales_price,
        markup: Markup::from_multiplier(multiplier),
    }
}

#[inline]
fn percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}
