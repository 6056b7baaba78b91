//! Pricing Calculator
//!
//! Runs the formula engine over a [`PricingInput`] and packs the figures into
//! a [`PricingResult`]. Guarded conditions never fail the calculation: the
//! affected figure is reported as zero / `None` and the condition is listed in
//! `issues`.

use rust_decimal::prelude::*;
use shared::models::{Markup, PriceDriver, PricingError, PricingInput, PricingResult};

use super::engine::{
    compute_total_cost, deduction_rate, margin_percent_from_price, markup_percent_from_price,
    price_from_margin, price_from_markup, ratios_from_price, suggested_price,
};

/// Money: 2 decimal places, half away from zero
const MONEY_DP: u32 = 2;
/// Percentages: 2 decimal places
const PERCENT_DP: u32 = 2;
/// Markup multipliers: 4 decimal places
const MULTIPLIER_DP: u32 = 4;

#[inline]
fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary value for storage and display
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    round_dp(value, MONEY_DP)
}

/// Round a percentage for storage and display
#[inline]
pub fn round_percent(value: Decimal) -> Decimal {
    round_dp(value, PERCENT_DP)
}

/// Entry point of the pricing engine
pub struct PricingCalculator;

impl PricingCalculator {
    /// Total acquisition cost of the input's unit
    pub fn total_cost(input: &PricingInput) -> Decimal {
        compute_total_cost(
            input.cost_price,
            input.acquisition_tax_rates.icms_purchase,
            input.acquisition_tax_rates.ipi_purchase,
            input.freight,
            input.other_costs,
        )
    }

    /// Suggested price from cost, expense rates, sales taxes and desired margin
    ///
    /// Markup is reported as a multiplier of total cost.
    pub fn suggest(input: &PricingInput) -> PricingResult {
        let total_cost = Self::total_cost(input);
        let total_sales_tax_rate = input.sales_tax_rates.total();
        let total_deduction_rate = deduction_rate(
            input.fixed_expense_rate,
            input.variable_expense_rate,
            total_sales_tax_rate,
            input.desired_profit_margin,
        );

        let suggestion = suggested_price(total_cost, total_deduction_rate);
        let mut issues = Vec::new();

        let (sales_price, markup, profit_margin) = match suggestion.issue() {
            Some(issue) => {
                issues.push(issue);
                (Decimal::ZERO, None, None)
            }
            None => {
                let sales_price = suggestion.sales_price();
                let markup = if total_cost.is_zero() {
                    issues.push(PricingError::ZeroCost);
                    None
                } else {
                    Some(Markup::from_multiplier(round_dp(
                        suggestion.markup().multiplier(),
                        MULTIPLIER_DP,
                    )))
                };
                let profit_margin = collect(
                    margin_percent_from_price(total_cost, sales_price),
                    &mut issues,
                );
                (sales_price, markup, profit_margin)
            }
        };

        let result = PricingResult {
            total_cost: round_money(total_cost),
            total_sales_tax_rate,
            total_deduction_rate,
            sales_price: round_money(sales_price),
            markup,
            profit_margin: profit_margin.map(round_percent),
            issues,
        };
        trace_result("suggest", &result);
        result
    }

    /// Recompute the product form after the user edited one of markup, margin
    /// or price
    ///
    /// The driver's value is taken as given; the other two are derived from
    /// it. Markup is reported as a percentage.
    pub fn recalculate(input: &PricingInput, driver: PriceDriver) -> PricingResult {
        let total_cost = Self::total_cost(input);
        let total_sales_tax_rate = input.sales_tax_rates.total();
        let total_deduction_rate = deduction_rate(
            input.fixed_expense_rate,
            input.variable_expense_rate,
            total_sales_tax_rate,
            input.desired_profit_margin,
        );
        let mut issues = Vec::new();

        let (sales_price, markup, profit_margin) = match driver {
            PriceDriver::Markup(markup_percent) => {
                let sales_price = price_from_markup(total_cost, markup_percent);
                let margin = collect(
                    margin_percent_from_price(total_cost, sales_price),
                    &mut issues,
                );
                (
                    sales_price,
                    Some(Markup::from_percent(markup_percent)),
                    margin,
                )
            }
            PriceDriver::Margin(margin_percent) => {
                match collect(price_from_margin(total_cost, margin_percent), &mut issues) {
                    Some(sales_price) => {
                        let markup = collect(
                            markup_percent_from_price(total_cost, sales_price),
                            &mut issues,
                        );
                        (
                            sales_price,
                            markup.map(|p| Markup::from_percent(round_percent(p))),
                            Some(margin_percent),
                        )
                    }
                    None => (Decimal::ZERO, None, Some(margin_percent)),
                }
            }
            PriceDriver::Price(sales_price) => {
                let ratios = ratios_from_price(total_cost, sales_price);
                issues.extend(ratios.issues());
                (
                    sales_price,
                    ratios
                        .markup_percent
                        .map(|p| Markup::from_percent(round_percent(p))),
                    ratios.margin_percent,
                )
            }
        };

        let result = PricingResult {
            total_cost: round_money(total_cost),
            total_sales_tax_rate,
            total_deduction_rate,
            sales_price: round_money(sales_price),
            markup,
            profit_margin: profit_margin.map(round_percent),
            issues,
        };
        trace_result("recalculate", &result);
        result
    }
}

/// Move a guarded engine error into `issues`
fn collect<T>(outcome: Result<T, PricingError>, issues: &mut Vec<PricingError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

fn trace_result(operation: &'static str, result: &PricingResult) {
    tracing::debug!(
        operation,
        total_cost = %result.total_cost,
        deduction_rate = %result.total_deduction_rate,
        sales_price = %result.sales_price,
        markup = %result.markup_multiplier(),
        profit_margin = %result.profit_margin_or_zero(),
        "Pricing computed"
    );

    if !result.is_computable() {
        tracing::warn!(operation, issues = ?result.issues, "Sales price is undefined");
    } else if !result.issues.is_empty() {
        tracing::warn!(operation, issues = ?result.issues, "Pricing partially computed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::models::{AcquisitionTaxRates, SalesTaxRates};

    fn input(cost: Decimal) -> PricingInput {
        PricingInput {
            cost_price: cost,
            ..Default::default()
        }
    }

    #[test]
    fn test_suggest_reference_case() {
        let input = PricingInput {
            cost_price: dec!(50),
            sales_tax_rates: SalesTaxRates {
                icms: dec!(20),
                ..Default::default()
            },
            fixed_expense_rate: dec!(10),
            variable_expense_rate: dec!(5),
            desired_profit_margin: dec!(15),
            ..Default::default()
        };

        let result = PricingCalculator::suggest(&input);
        assert_eq!(result.total_cost, dec!(50));
        assert_eq!(result.total_sales_tax_rate, dec!(20));
        assert_eq!(result.total_deduction_rate, dec!(50));
        assert_eq!(result.sales_price, dec!(100));
        assert_eq!(result.markup_multiplier(), dec!(2));
        assert_eq!(result.profit_margin, Some(dec!(50)));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_suggest_compounds_acquisition_costs() {
        let input = PricingInput {
            cost_price: dec!(100),
            acquisition_tax_rates: AcquisitionTaxRates {
                icms_purchase: dec!(10),
                ipi_purchase: dec!(5),
            },
            freight: dec!(20),
            ..Default::default()
        };
        let result = PricingCalculator::suggest(&input);
        assert_eq!(result.total_cost, dec!(135));
        assert_eq!(result.sales_price, dec!(135));
        assert_eq!(result.markup_multiplier(), dec!(1));
    }

    #[test]
    fn test_suggest_full_deduction_is_sentinel() {
        let input = PricingInput {
            cost_price: dec!(100),
            fixed_expense_rate: dec!(40),
            desired_profit_margin: dec!(60),
            ..Default::default()
        };
        let result = PricingCalculator::suggest(&input);
        assert!(!result.is_computable());
        assert_eq!(result.sales_price, Decimal::ZERO);
        assert_eq!(result.markup, None);
        assert_eq!(result.profit_margin, None);
        assert_eq!(
            result.issues,
            vec![PricingError::DeductionRateOverflow {
                deduction_rate: dec!(100)
            }]
        );
    }

    #[test]
    fn test_suggest_zero_cost() {
        let result = PricingCalculator::suggest(&input(Decimal::ZERO));
        assert!(result.is_computable());
        assert_eq!(result.sales_price, Decimal::ZERO);
        assert_eq!(result.markup_multiplier(), Decimal::ZERO);
        assert!(result.issues.contains(&PricingError::ZeroCost));
        assert!(result.issues.contains(&PricingError::ZeroPrice));
    }

    #[test]
    fn test_suggest_rounds_money() {
        let input = PricingInput {
            cost_price: dec!(10),
            desired_profit_margin: dec!(30),
            ..Default::default()
        };
        let result = PricingCalculator::suggest(&input);
        assert_eq!(result.sales_price, dec!(14.29));
        assert_eq!(result.markup_multiplier(), dec!(1.4286));
    }

    #[test]
    fn test_suggest_deduction_just_under_full() {
        let input = PricingInput {
            cost_price: dec!(1),
            fixed_expense_rate: Decimal::ONE_HUNDRED - Decimal::new(1, 26),
            ..Default::default()
        };
        let result = PricingCalculator::suggest(&input);
        assert!(result.is_computable());
        assert!(result.issues.is_empty());
        assert!(result.sales_price > dec!(1000000000000000000000000000));
        assert_eq!(result.markup_percent(), Decimal::MAX);
        assert_eq!(result.profit_margin, Some(dec!(100)));

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["markup"]["percent"].as_f64().unwrap() > 1e28);
    }

    #[test]
    fn test_suggest_huge_sales_taxes() {
        let input = PricingInput {
            cost_price: dec!(10),
            sales_tax_rates: SalesTaxRates {
                icms: Decimal::MAX,
                pis: Decimal::MAX,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = PricingCalculator::suggest(&input);
        assert_eq!(result.total_sales_tax_rate, Decimal::MAX);
        assert!(!result.is_computable());
        assert_eq!(result.sales_price, Decimal::ZERO);
        assert!(serde_json::to_string(&result).is_ok());
    }

    #[test]
    fn test_recalculate_huge_values() {
        let extreme = PricingInput {
            cost_price: Decimal::MAX,
            sales_tax_rates: SalesTaxRates {
                cofins: Decimal::MAX,
                irpj: Decimal::MAX,
                ..Default::default()
            },
            fixed_expense_rate: Decimal::MAX,
            ..Default::default()
        };
        let result = PricingCalculator::recalculate(&extreme, PriceDriver::Markup(Decimal::MAX));
        assert_eq!(result.total_deduction_rate, Decimal::MAX);
        assert_eq!(result.sales_price, Decimal::MAX);
        assert!(result.is_computable());
        assert!(serde_json::to_string(&result).is_ok());

        let result =
            PricingCalculator::recalculate(&input(dec!(0.01)), PriceDriver::Price(Decimal::MAX));
        assert_eq!(result.sales_price, Decimal::MAX);
        assert!(serde_json::to_string(&result).is_ok());
    }

    #[test]
    fn test_recalculate_from_markup() {
        let result = PricingCalculator::recalculate(&input(dec!(80)), PriceDriver::Markup(dec!(25)));
        assert_eq!(result.sales_price, dec!(100));
        assert_eq!(result.markup_percent(), dec!(25));
        assert_eq!(result.profit_margin, Some(dec!(20)));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_recalculate_from_margin() {
        let result = PricingCalculator::recalculate(&input(dec!(80)), PriceDriver::Margin(dec!(20)));
        assert_eq!(result.sales_price, dec!(100));
        assert_eq!(result.markup_percent(), dec!(25));
        assert_eq!(result.profit_margin, Some(dec!(20)));
    }

    #[test]
    fn test_recalculate_from_degenerate_margin() {
        let result =
            PricingCalculator::recalculate(&input(dec!(80)), PriceDriver::Margin(dec!(100)));
        assert!(!result.is_computable());
        assert_eq!(result.sales_price, Decimal::ZERO);
        assert_eq!(result.markup, None);
        assert_eq!(
            result.issues,
            vec![PricingError::DegenerateMargin {
                margin_percent: dec!(100)
            }]
        );
    }

    #[test]
    fn test_recalculate_from_price() {
        let result = PricingCalculator::recalculate(&input(dec!(80)), PriceDriver::Price(dec!(100)));
        assert_eq!(result.sales_price, dec!(100));
        assert_eq!(result.markup_percent(), dec!(25));
        assert_eq!(result.profit_margin, Some(dec!(20)));
    }

    #[test]
    fn test_recalculate_price_over_zero_cost() {
        let result =
            PricingCalculator::recalculate(&input(Decimal::ZERO), PriceDriver::Price(dec!(50)));
        assert!(result.is_computable());
        assert_eq!(result.markup, None);
        assert_eq!(result.profit_margin, Some(dec!(100)));
        assert_eq!(result.issues, vec![PricingError::ZeroCost]);
    }

    #[test]
    fn test_recalculate_zero_price() {
        let result =
            PricingCalculator::recalculate(&input(dec!(10)), PriceDriver::Price(Decimal::ZERO));
        assert_eq!(result.profit_margin, None);
        assert_eq!(result.markup_percent(), dec!(-100));
        assert_eq!(result.issues, vec![PricingError::ZeroPrice]);
    }
}
