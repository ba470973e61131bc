//! JSON bodies exchanged between the server and the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, Salary, Savings};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ExpensesBody {
    pub(crate) success: bool,
    pub(crate) expenses: Vec<Expense>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreatedBody {
    pub(crate) success: bool,
    pub(crate) id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SalaryBody {
    pub(crate) success: bool,
    pub(crate) salary: Salary,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SavingsBody {
    pub(crate) success: bool,
    pub(crate) savings: Savings,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AckBody {
    pub(crate) success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) success: bool,
    pub(crate) error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HealthBody {
    pub(crate) status: String,
    pub(crate) timestamp: DateTime<Utc>,
}

impl AckBody {
    pub(crate) fn ok() -> Self {
        Self { success: true }
    }
}
