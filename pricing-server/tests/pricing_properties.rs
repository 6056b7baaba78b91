//! Reference properties of the pricing engine through the public API

use pricing_server::pricing::aggregation::tax_rates_by_type;
use pricing_server::pricing::engine::{
    compute_total_cost, deduction_rate, price_from_margin, price_from_markup, ratios_from_price,
    suggested_price,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::models::{Tax, TaxType};

fn close(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < dec!(0.000001)
}

#[test]
fn markup_survives_round_trip() {
    for cost in [dec!(0.01), dec!(1), dec!(135), dec!(98765.43)] {
        for markup in [dec!(0), dec!(12.5), dec!(100), dec!(333.33)] {
            let price = price_from_markup(cost, markup);
            let recovered = ratios_from_price(cost, price).markup_percent.unwrap();
            assert!(close(recovered, markup), "cost {} markup {}", cost, markup);
        }
    }
}

#[test]
fn margin_survives_round_trip() {
    for cost in [dec!(0.01), dec!(1), dec!(135), dec!(98765.43)] {
        for margin in [dec!(0), dec!(12.5), dec!(50), dec!(99.99)] {
            let price = price_from_margin(cost, margin).unwrap();
            let recovered = ratios_from_price(cost, price).margin_percent.unwrap();
            assert!(close(recovered, margin), "cost {} margin {}", cost, margin);
        }
    }
}

#[test]
fn full_deduction_leaves_price_undefined() {
    let suggestion = suggested_price(dec!(100), dec!(100));
    assert_eq!(suggestion.sales_price(), Decimal::ZERO);
    assert!(!suggestion.is_defined());
}

#[test]
fn zero_cost_markup_is_not_computable() {
    assert_eq!(ratios_from_price(Decimal::ZERO, dec!(50)).markup_percent, None);
}

#[test]
fn same_type_taxes_add_up() {
    let taxes: Vec<Tax> = [dec!(18), dec!(2)]
        .into_iter()
        .enumerate()
        .map(|(i, rate)| Tax {
            id: i as i64,
            company_id: 1,
            tax_type: TaxType::Icms,
            rate,
            created_at: 0,
        })
        .collect();
    assert_eq!(tax_rates_by_type(&taxes)[&TaxType::Icms], dec!(20));
}

#[test]
fn reference_suggested_price() {
    let rate = deduction_rate(dec!(10), dec!(5), dec!(20), dec!(15));
    let suggestion = suggested_price(dec!(50), rate);
    assert_eq!(rate, dec!(50));
    assert_eq!(suggestion.sales_price(), dec!(100));
    assert_eq!(suggestion.markup().multiplier(), dec!(2.0));
}

#[test]
fn reference_total_cost() {
    let total = compute_total_cost(dec!(100), dec!(10), dec!(5), dec!(20), Decimal::ZERO);
    assert_eq!(total, dec!(135));
}
