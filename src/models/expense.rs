use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded expense. `user_id` and `created_at` are stamped by the server
/// when the record is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// What a client submits: an expense without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(amount: Decimal, description: String, category: String, date: NaiveDate) -> Self {
        Self {
            amount,
            description,
            category,
            date,
        }
    }

    pub fn into_expense(self, id: String) -> Expense {
        Expense {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            user_id: None,
            created_at: None,
        }
    }
}

impl Expense {
    /// "YYYY-MM" of the expense date.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}
