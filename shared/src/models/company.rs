//! Company Model

use serde::{Deserialize, Serialize};

/// Company (tenant root): every expense, revenue, tax, calculation and
/// product belongs to exactly one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Create company payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
}
