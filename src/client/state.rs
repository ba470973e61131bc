use chrono::Utc;
use rust_decimal::Decimal;

use super::{sample_expenses, FinanceApi};
use crate::error::ClientError;
use crate::ledger::new_expense_id;
use crate::models::{Expense, NewExpense, Salary, Savings, SavingsUpdate};

/// What happened to a UI action after talking to the server.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SyncOutcome {
    Synced,
    /// The server was unreachable and the change (or a default) was applied
    /// locally instead.
    LocalOnly(String),
    /// The call failed and local state was left as it was.
    Unchanged(String),
    /// The input was refused before anything was sent.
    Invalid(&'static str),
}

impl SyncOutcome {
    pub(crate) fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// Expenses, salary and savings as the UI sees them.
#[derive(Debug, Clone, Default)]
pub(crate) struct FinanceState {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) salary: Salary,
    pub(crate) savings: Savings,
}

fn unchanged(err: ClientError) -> SyncOutcome {
    tracing::warn!(error = %err, "request failed; keeping local state");
    SyncOutcome::Unchanged(err.to_string())
}

impl FinanceState {
    /// Loads everything; the first failure, if any, is reported.
    pub(crate) fn refresh_all(&mut self, api: &dyn FinanceApi) -> SyncOutcome {
        let outcomes = [
            self.refresh_expenses(api),
            self.refresh_salary(api),
            self.refresh_savings(api),
        ];
        outcomes
            .into_iter()
            .find(|o| !o.is_synced())
            .unwrap_or(SyncOutcome::Synced)
    }

    /// An unreachable server swaps in the demo data set.
    pub(crate) fn refresh_expenses(&mut self, api: &dyn FinanceApi) -> SyncOutcome {
        match api.list_expenses() {
            Ok(expenses) => {
                self.expenses = expenses;
                SyncOutcome::Synced
            }
            Err(err) if err.is_network_failure() => {
                tracing::warn!(error = %err, "could not load expenses; showing sample data");
                self.expenses = sample_expenses();
                SyncOutcome::LocalOnly(format!("Offline, showing sample data ({err})"))
            }
            Err(err) => unchanged(err),
        }
    }

    pub(crate) fn refresh_salary(&mut self, api: &dyn FinanceApi) -> SyncOutcome {
        match api.salary() {
            Ok(salary) => {
                self.salary = salary;
                SyncOutcome::Synced
            }
            Err(err) => unchanged(err),
        }
    }

    pub(crate) fn refresh_savings(&mut self, api: &dyn FinanceApi) -> SyncOutcome {
        match api.savings() {
            Ok(savings) => {
                self.savings = savings;
                SyncOutcome::Synced
            }
            Err(err) => unchanged(err),
        }
    }

    /// New expenses go to the front of the list. If the server is
    /// unreachable the expense is kept locally under a local id.
    pub(crate) fn add_expense(&mut self, api: &dyn FinanceApi, new: NewExpense) -> SyncOutcome {
        match api.add_expense(&new) {
            Ok(id) => {
                self.expenses.insert(0, new.into_expense(id));
                SyncOutcome::Synced
            }
            Err(err) if err.is_network_failure() => {
                tracing::warn!(error = %err, "could not add expense; keeping it locally");
                let id = new_expense_id(Utc::now());
                self.expenses.insert(0, new.into_expense(id));
                SyncOutcome::LocalOnly(format!("Saved locally only ({err})"))
            }
            Err(err) => unchanged(err),
        }
    }

    pub(crate) fn delete_expense(&mut self, api: &dyn FinanceApi, id: &str) -> SyncOutcome {
        match api.delete_expense(id) {
            Ok(()) => {
                self.expenses.retain(|e| e.id != id);
                SyncOutcome::Synced
            }
            Err(err) if err.is_network_failure() => {
                tracing::warn!(error = %err, id, "could not delete expense; removing locally");
                self.expenses.retain(|e| e.id != id);
                SyncOutcome::LocalOnly(format!("Removed locally only ({err})"))
            }
            Err(err) => unchanged(err),
        }
    }

    pub(crate) fn set_salary(&mut self, api: &dyn FinanceApi, monthly: Decimal) -> SyncOutcome {
        if monthly <= Decimal::ZERO {
            return SyncOutcome::Invalid("Salary must be greater than zero");
        }
        match api.set_salary(monthly) {
            Ok(()) => {
                self.salary.monthly = monthly;
                self.salary.last_updated = Some(Utc::now());
                SyncOutcome::Synced
            }
            Err(err) => unchanged(err),
        }
    }

    pub(crate) fn set_goal(&mut self, api: &dyn FinanceApi, goal: Decimal) -> SyncOutcome {
        if goal <= Decimal::ZERO {
            return SyncOutcome::Invalid("Goal must be greater than zero");
        }
        let update = self.savings.with_goal(goal);
        self.update_savings(api, update)
    }

    pub(crate) fn deposit(&mut self, api: &dyn FinanceApi, amount: Decimal) -> SyncOutcome {
        if amount <= Decimal::ZERO {
            return SyncOutcome::Invalid("Amount must be greater than zero");
        }
        let update = self.savings.deposit(amount);
        self.update_savings(api, update)
    }

    /// Withdrawing more than the balance empties it.
    pub(crate) fn withdraw(&mut self, api: &dyn FinanceApi, amount: Decimal) -> SyncOutcome {
        if amount <= Decimal::ZERO {
            return SyncOutcome::Invalid("Amount must be greater than zero");
        }
        let update = self.savings.withdraw(amount);
        self.update_savings(api, update)
    }

    /// Sends the full record with `update` merged in, then applies it locally
    /// once the server accepts it.
    fn update_savings(&mut self, api: &dyn FinanceApi, update: SavingsUpdate) -> SyncOutcome {
        let mut merged = self.savings.clone();
        merged.apply(&update);
        let full = SavingsUpdate {
            goal: Some(merged.goal),
            current: Some(merged.current),
        };
        match api.update_savings(&full) {
            Ok(()) => {
                merged.last_updated = Some(Utc::now());
                self.savings = merged;
                SyncOutcome::Synced
            }
            Err(err) => unchanged(err),
        }
    }
}
