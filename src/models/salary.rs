use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gross monthly salary shown when nothing has been saved yet.
pub const DEFAULT_MONTHLY_SALARY: i64 = 50_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for Salary {
    fn default() -> Self {
        Self {
            monthly: Decimal::from(DEFAULT_MONTHLY_SALARY),
            last_updated: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
}
