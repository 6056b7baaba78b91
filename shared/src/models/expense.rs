//! Expense Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_decimal;

/// Expense kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    /// Rent, salaries and other costs independent of sales volume
    Fixed,
    /// Commissions, card fees and other costs that scale with sales
    Variable,
}

/// Monthly expense of a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub company_id: i64,
    pub description: String,
    pub value: Decimal,
    pub kind: ExpenseKind,
    pub created_at: i64,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCreate {
    pub description: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    pub kind: ExpenseKind,
}
