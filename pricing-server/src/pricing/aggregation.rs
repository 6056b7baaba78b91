//! Cost and Tax Aggregation
//!
//! Turns a company's expense, revenue and tax records into the percentage
//! rates the calculator consumes. All functions are pure and leave their
//! inputs untouched.

use rust_decimal::Decimal;
use shared::models::{
    CompanyRates, Expense, ExpenseKind, Revenue, RevenuePeriod, SalesTaxRates, Tax, TaxType,
};
use std::collections::BTreeMap;

/// Value of the first MONTHLY revenue, zero if there is none
pub fn monthly_revenue(revenues: &[Revenue]) -> Decimal {
    revenues
        .iter()
        .find(|r| r.period == RevenuePeriod::Monthly)
        .map(|r| r.value)
        .unwrap_or_default()
}

/// Sum of expenses of `kind` as a percentage of monthly revenue
///
/// Zero when there is no revenue to divide by; saturates at `Decimal::MAX`.
pub fn expense_rate(expenses: &[Expense], kind: ExpenseKind, monthly_revenue: Decimal) -> Decimal {
    if monthly_revenue.is_zero() {
        return Decimal::ZERO;
    }

    let total = expenses
        .iter()
        .filter(|e| e.kind == kind)
        .fold(Decimal::ZERO, |total, e| total.saturating_add(e.value));

    total
        .checked_div(monthly_revenue)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

pub fn fixed_expense_rate(expenses: &[Expense], monthly_revenue: Decimal) -> Decimal {
    expense_rate(expenses, ExpenseKind::Fixed, monthly_revenue)
}

pub fn variable_expense_rate(expenses: &[Expense], monthly_revenue: Decimal) -> Decimal {
    expense_rate(expenses, ExpenseKind::Variable, monthly_revenue)
}

/// Tax rates grouped by type; several records of one type add up
pub fn tax_rates_by_type(taxes: &[Tax]) -> BTreeMap<TaxType, Decimal> {
    let mut rates = BTreeMap::new();
    for tax in taxes {
        let rate = rates.entry(tax.tax_type).or_insert(Decimal::ZERO);
        *rate = rate.saturating_add(tax.rate);
    }
    rates
}

/// Sum of every configured tax rate
pub fn total_sales_tax_rate(taxes: &[Tax]) -> Decimal {
    taxes
        .iter()
        .fold(Decimal::ZERO, |total, t| total.saturating_add(t.rate))
}

/// All calculator rates for one company
pub fn aggregate(expenses: &[Expense], revenues: &[Revenue], taxes: &[Tax]) -> CompanyRates {
    let revenue = monthly_revenue(revenues);

    CompanyRates {
        monthly_revenue: revenue,
        fixed_expense_rate: fixed_expense_rate(expenses, revenue),
        variable_expense_rate: variable_expense_rate(expenses, revenue),
        sales_tax_rates: SalesTaxRates::from_rates_by_type(&tax_rates_by_type(taxes)),
        total_sales_tax_rate: total_sales_tax_rate(taxes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn expense(value: Decimal, kind: ExpenseKind) -> Expense {
        Expense {
            id: 1,
            company_id: 1,
            description: "expense".to_string(),
            value,
            kind,
            created_at: 0,
        }
    }

    fn revenue(value: Decimal, period: RevenuePeriod) -> Revenue {
        Revenue {
            id: 1,
            company_id: 1,
            description: String::new(),
            value,
            period,
            created_at: 0,
        }
    }

    fn tax(tax_type: TaxType, rate: Decimal) -> Tax {
        Tax {
            id: 1,
            company_id: 1,
            tax_type,
            rate,
            created_at: 0,
        }
    }

    #[test]
    fn test_monthly_revenue_takes_first_monthly() {
        let revenues = vec![
            revenue(dec!(120000), RevenuePeriod::Annual),
            revenue(dec!(10000), RevenuePeriod::Monthly),
            revenue(dec!(99999), RevenuePeriod::Monthly),
        ];
        assert_eq!(monthly_revenue(&revenues), dec!(10000));
        assert_eq!(
            monthly_revenue(&[revenue(dec!(5), RevenuePeriod::Annual)]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_expense_rates_split_by_kind() {
        let expenses = vec![
            expense(dec!(1000), ExpenseKind::Fixed),
            expense(dec!(500), ExpenseKind::Fixed),
            expense(dec!(800), ExpenseKind::Variable),
        ];
        assert_eq!(fixed_expense_rate(&expenses, dec!(10000)), dec!(15));
        assert_eq!(variable_expense_rate(&expenses, dec!(10000)), dec!(8));
    }

    #[test]
    fn test_expense_rate_without_revenue_is_zero() {
        let expenses = vec![expense(dec!(1000), ExpenseKind::Fixed)];
        assert_eq!(fixed_expense_rate(&expenses, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(variable_expense_rate(&[], dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_same_type_taxes_are_additive() {
        let taxes = vec![
            tax(TaxType::Icms, dec!(18)),
            tax(TaxType::Icms, dec!(2)),
            tax(TaxType::Pis, dec!(1.65)),
        ];
        let by_type = tax_rates_by_type(&taxes);
        assert_eq!(by_type[&TaxType::Icms], dec!(20));
        assert_eq!(by_type[&TaxType::Pis], dec!(1.65));
        assert!(!by_type.contains_key(&TaxType::Cofins));
        assert_eq!(total_sales_tax_rate(&taxes), dec!(21.65));
    }

    #[test]
    fn test_huge_records_saturate() {
        let expenses = vec![
            expense(Decimal::MAX, ExpenseKind::Fixed),
            expense(Decimal::MAX, ExpenseKind::Fixed),
        ];
        let revenues = vec![revenue(dec!(0.01), RevenuePeriod::Monthly)];
        let taxes = vec![tax(TaxType::Icms, Decimal::MAX), tax(TaxType::Icms, Decimal::MAX)];

        let rates = aggregate(&expenses, &revenues, &taxes);
        assert_eq!(rates.fixed_expense_rate, Decimal::MAX);
        assert_eq!(rates.variable_expense_rate, Decimal::ZERO);
        assert_eq!(rates.sales_tax_rates.icms, Decimal::MAX);
        assert_eq!(rates.sales_tax_rates.total(), Decimal::MAX);
        assert_eq!(rates.total_sales_tax_rate, Decimal::MAX);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let expenses = vec![
            expense(dec!(2000), ExpenseKind::Fixed),
            expense(dec!(1000), ExpenseKind::Variable),
        ];
        let revenues = vec![revenue(dec!(20000), RevenuePeriod::Monthly)];
        let taxes = vec![tax(TaxType::Icms, dec!(18)), tax(TaxType::Cofins, dec!(3))];

        let rates = aggregate(&expenses, &revenues, &taxes);
        assert_eq!(rates.monthly_revenue, dec!(20000));
        assert_eq!(rates.fixed_expense_rate, dec!(10));
        assert_eq!(rates.variable_expense_rate, dec!(5));
        assert_eq!(rates.sales_tax_rates.icms, dec!(18));
        assert_eq!(rates.sales_tax_rates.cofins, dec!(3));
        assert_eq!(rates.total_sales_tax_rate, dec!(21));

        assert_eq!(aggregate(&expenses, &revenues, &taxes), rates);
        assert_eq!(expenses.len(), 2);
    }
}
