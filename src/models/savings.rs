use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAVINGS_GOAL: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    #[serde(with = "rust_decimal::serde::float")]
    pub goal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for Savings {
    fn default() -> Self {
        Self {
            goal: Decimal::from(DEFAULT_SAVINGS_GOAL),
            current: Decimal::ZERO,
            last_updated: None,
        }
    }
}

/// Partial savings record. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub goal: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub current: Option<Decimal>,
}

impl Savings {
    pub fn apply(&mut self, update: &SavingsUpdate) {
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        if let Some(current) = update.current {
            self.current = current;
        }
    }

    pub fn deposit(&self, amount: Decimal) -> SavingsUpdate {
        SavingsUpdate {
            goal: None,
            current: Some(self.current.saturating_add(amount)),
        }
    }

    /// Withdrawals never take the balance below zero.
    pub fn withdraw(&self, amount: Decimal) -> SavingsUpdate {
        SavingsUpdate {
            goal: None,
            current: Some(self.current.saturating_sub(amount).max(Decimal::ZERO)),
        }
    }

    pub fn with_goal(&self, goal: Decimal) -> SavingsUpdate {
        SavingsUpdate {
            goal: Some(goal),
            current: None,
        }
    }
}
