//! Derived figures the screens and the CLI show. Every function is pure;
//! "today" is always passed in.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{Expense, Savings};

/// Monthly spending limit used until the user sets one.
pub(crate) const DEFAULT_MONTHLY_BUDGET: i64 = 35_000;
/// Monthly contribution assumed by the "months to goal" estimate.
pub(crate) const MONTHLY_SAVINGS_PACE: i64 = 5_000;
/// Months shown in the monthly bar chart.
pub(crate) const MONTHS_SHOWN: usize = 6;
/// Categories shown in the category split.
pub(crate) const TOP_CATEGORIES: usize = 6;

/// Sum that stops at `Decimal::MAX`/`MIN` instead of overflowing.
pub(crate) fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// `part` as a percentage of `whole`; 0 when `whole` is zero, saturated when
/// the ratio is out of range.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

pub(crate) fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Sum of expenses dated within `month` ("YYYY-MM").
pub(crate) fn month_total(expenses: &[Expense], month: &str) -> Decimal {
    total(
        expenses
            .iter()
            .filter(|e| e.month() == month)
            .map(|e| e.amount),
    )
}

/// Totals per month, oldest first, keeping only the last `limit` months that
/// have any expenses.
pub(crate) fn monthly_totals(expenses: &[Expense], limit: usize) -> Vec<(String, Decimal)> {
    let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
    for exp in expenses {
        let sum = by_month.entry(exp.month()).or_default();
        *sum = sum.saturating_add(exp.amount);
    }
    let skip = by_month.len().saturating_sub(limit);
    by_month.into_iter().skip(skip).collect()
}

fn sorted_by_total<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for exp in expenses {
        let sum = totals.entry(exp.category.as_str()).or_default();
        *sum = sum.saturating_add(exp.amount);
    }
    let mut out: Vec<(String, Decimal)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    // Stable sort keeps ties in name order
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Totals per category, largest first, truncated to `limit`.
pub(crate) fn category_totals(expenses: &[Expense], limit: usize) -> Vec<(String, Decimal)> {
    let mut totals = sorted_by_total(expenses.iter());
    totals.truncate(limit);
    totals
}

pub(crate) fn expenses_on(expenses: &[Expense], day: NaiveDate) -> Vec<&Expense> {
    expenses.iter().filter(|e| e.date == day).collect()
}

pub(crate) fn day_total(expenses: &[Expense], day: NaiveDate) -> Decimal {
    total(
        expenses
            .iter()
            .filter(|e| e.date == day)
            .map(|e| e.amount),
    )
}

/// Per-category totals for one day, largest first.
pub(crate) fn day_category_totals(expenses: &[Expense], day: NaiveDate) -> Vec<(String, Decimal)> {
    sorted_by_total(expenses.iter().filter(|e| e.date == day))
}

/// `days` consecutive days ending on `today`, oldest first, with the total
/// spent on each.
pub(crate) fn trailing_days(
    expenses: &[Expense],
    today: NaiveDate,
    days: u64,
) -> Vec<(NaiveDate, Decimal)> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| (day, day_total(expenses, day)))
        .collect()
}

// ── Summaries ─────────────────────────────────────────────────

/// A selected day compared against the seven days ending today.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyComparison {
    pub(crate) total: Decimal,
    pub(crate) week: Vec<(NaiveDate, Decimal)>,
    pub(crate) week_total: Decimal,
    pub(crate) average: Decimal,
}

impl DailyComparison {
    pub(crate) fn new(expenses: &[Expense], day: NaiveDate, today: NaiveDate) -> Self {
        let week = trailing_days(expenses, today, 7);
        let week_total = total(week.iter().map(|(_, t)| *t));
        Self {
            total: day_total(expenses, day),
            week,
            week_total,
            average: week_total / Decimal::from(7),
        }
    }

    pub(crate) fn above_average(&self) -> bool {
        self.total > self.average
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetSummary {
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) percent_used: Decimal,
}

impl BudgetSummary {
    pub(crate) fn new(budget: Decimal, spent: Decimal) -> Self {
        Self {
            budget,
            spent,
            remaining: budget.saturating_sub(spent),
            percent_used: percent(spent, budget),
        }
    }

    pub(crate) fn over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SavingsRating {
    Great,
    Good,
    Low,
}

impl SavingsRating {
    pub(crate) fn from_rate(rate: Decimal) -> Self {
        if rate >= Decimal::from(20) {
            Self::Great
        } else if rate >= Decimal::TEN {
            Self::Good
        } else {
            Self::Low
        }
    }

    pub(crate) fn advice(&self) -> &'static str {
        match self {
            Self::Great => "Great savings rate! You're on track for financial goals.",
            Self::Good => "Good savings rate. Consider reducing expenses to save more.",
            Self::Low => "Low savings rate. Review your budget to increase savings.",
        }
    }
}

/// Salary against this month's expenses.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SalarySummary {
    pub(crate) monthly: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) expense_percent: Decimal,
    pub(crate) savings_rate: Decimal,
}

impl SalarySummary {
    pub(crate) fn new(monthly: Decimal, expenses: Decimal) -> Self {
        let remaining = monthly.saturating_sub(expenses);
        Self {
            monthly,
            expenses,
            remaining,
            expense_percent: percent(expenses, monthly),
            savings_rate: percent(remaining, monthly),
        }
    }

    pub(crate) fn rating(&self) -> SavingsRating {
        SavingsRating::from_rate(self.savings_rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SavingsSummary {
    pub(crate) progress_percent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) months_to_goal: u64,
}

impl SavingsSummary {
    pub(crate) fn new(savings: &Savings) -> Self {
        let remaining = savings.goal.saturating_sub(savings.current);
        let months_to_goal = if remaining > Decimal::ZERO {
            (remaining / Decimal::from(MONTHLY_SAVINGS_PACE))
                .ceil()
                .to_u64()
                .unwrap_or(0)
        } else {
            0
        };
        Self {
            progress_percent: percent(savings.current, savings.goal),
            remaining,
            months_to_goal,
        }
    }

    pub(crate) fn achieved(&self) -> bool {
        self.progress_percent >= Decimal::ONE_HUNDRED
    }
}
