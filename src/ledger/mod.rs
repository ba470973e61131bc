//! Finance records on top of a [`KvStore`]: key layout, id generation and
//! JSON (de)serialisation for expenses, salary and savings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::StoreResult;
use crate::kv::KvStore;
use crate::models::{Expense, NewExpense, Salary, SalaryUpdate, Savings, SavingsUpdate};

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn expense_prefix(user_id: &str) -> String {
    format!("expenses:{user_id}:")
}

fn expense_key(user_id: &str, expense_id: &str) -> String {
    format!("expenses:{user_id}:{expense_id}")
}

fn salary_key(user_id: &str) -> String {
    format!("salary:{user_id}")
}

fn savings_key(user_id: &str) -> String {
    format!("savings:{user_id}")
}

/// Millisecond timestamp followed by nine random base-36 characters, so ids
/// sort by creation time.
pub(crate) fn new_expense_id(now: DateTime<Utc>) -> String {
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    format!("{}{suffix}", now.timestamp_millis())
}

#[derive(Clone)]
pub(crate) struct Ledger {
    store: Arc<dyn KvStore>,
}

impl Ledger {
    pub(crate) fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Expenses in key order, which is creation order. Stored values that no
    /// longer parse are skipped.
    pub(crate) fn list_expenses(&self, user_id: &str) -> StoreResult<Vec<Expense>> {
        let prefix = expense_prefix(user_id);
        let entries = self.store.get_by_prefix(&prefix)?;
        let mut expenses = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry
                .key
                .strip_prefix(&prefix)
                .unwrap_or(&entry.key)
                .to_string();
            match serde_json::from_value::<Expense>(entry.value) {
                Ok(mut expense) => {
                    expense.id = id;
                    expenses.push(expense);
                }
                Err(e) => tracing::warn!(key = %entry.key, error = %e, "skipping unreadable expense"),
            }
        }
        Ok(expenses)
    }

    pub(crate) fn add_expense(&self, user_id: &str, new: NewExpense) -> StoreResult<String> {
        let now = Utc::now();
        let id = new_expense_id(now);
        let mut expense = new.into_expense(id.clone());
        expense.user_id = Some(user_id.to_string());
        expense.created_at = Some(now);
        self.store
            .set(&expense_key(user_id, &id), &serde_json::to_value(&expense)?)?;
        tracing::info!(user = user_id, id = %id, amount = %expense.amount, "expense added");
        Ok(id)
    }

    pub(crate) fn delete_expense(&self, user_id: &str, expense_id: &str) -> StoreResult<()> {
        self.store.del(&expense_key(user_id, expense_id))?;
        tracing::info!(user = user_id, id = expense_id, "expense deleted");
        Ok(())
    }

    // ── Salary ────────────────────────────────────────────────

    pub(crate) fn salary(&self, user_id: &str) -> StoreResult<Salary> {
        Ok(self.read(&salary_key(user_id))?.unwrap_or_default())
    }

    pub(crate) fn set_salary(&self, user_id: &str, update: SalaryUpdate) -> StoreResult<Salary> {
        let salary = Salary {
            monthly: update.monthly,
            last_updated: Some(Utc::now()),
        };
        self.store
            .set(&salary_key(user_id), &serde_json::to_value(&salary)?)?;
        tracing::info!(user = user_id, monthly = %salary.monthly, "salary updated");
        Ok(salary)
    }

    // ── Savings ───────────────────────────────────────────────

    pub(crate) fn savings(&self, user_id: &str) -> StoreResult<Savings> {
        Ok(self.read(&savings_key(user_id))?.unwrap_or_default())
    }

    /// Merges the given fields over the stored record (or the defaults) and
    /// writes the whole record back.
    pub(crate) fn update_savings(
        &self,
        user_id: &str,
        update: &SavingsUpdate,
    ) -> StoreResult<Savings> {
        let mut savings = self.savings(user_id)?;
        savings.apply(update);
        savings.last_updated = Some(Utc::now());
        self.store
            .set(&savings_key(user_id), &serde_json::to_value(&savings)?)?;
        tracing::info!(
            user = user_id,
            goal = %savings.goal,
            current = %savings.current,
            "savings updated"
        );
        Ok(savings)
    }

    /// A stored value that no longer parses reads as missing.
    fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(value) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable record");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests;
