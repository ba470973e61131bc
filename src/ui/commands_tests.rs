#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::client::ClientResult;
use crate::models::{Expense, Salary, Savings, SavingsUpdate};

/// Accepts everything and hands out fixed ids.
struct AcceptAll;

impl FinanceApi for AcceptAll {
    fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        Ok(Vec::new())
    }
    fn add_expense(&self, _expense: &NewExpense) -> ClientResult<String> {
        Ok("new-id".to_string())
    }
    fn delete_expense(&self, _id: &str) -> ClientResult<()> {
        Ok(())
    }
    fn salary(&self) -> ClientResult<Salary> {
        Ok(Salary::default())
    }
    fn set_salary(&self, _monthly: Decimal) -> ClientResult<()> {
        Ok(())
    }
    fn savings(&self) -> ClientResult<Savings> {
        Ok(Savings::default())
    }
    fn update_savings(&self, _update: &SavingsUpdate) -> ClientResult<()> {
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 15).unwrap()
}

fn app() -> App {
    let mut app = App::new("demo-user-001", today());
    app.finance.expenses = crate::client::sample_expenses();
    app
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = app();
    handle_command("delte", &mut app, &AcceptAll);
    assert!(app.status_message.contains("Did you mean :delete?"));
}

#[test]
fn test_find_closest_skips_single_letter_aliases() {
    assert_eq!(find_closest("savngs"), "savings");
    assert!(find_closest("x").len() > 1);
}

#[test]
fn test_blank_input_is_ignored() {
    let mut app = app();
    handle_command("   ", &mut app, &AcceptAll);
    assert!(app.status_message.is_empty());
    assert!(app.running);
}

#[test]
fn test_quit_and_screen_switches() {
    let mut app = app();
    handle_command("daily", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Daily);
    handle_command("m", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Manage);
    handle_command("salary", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Salary);
    handle_command("q", &mut app, &AcceptAll);
    assert!(!app.running);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_add_with_arguments_prepends() {
    let mut app = app();
    handle_command("add 250 food Lunch with the team", &mut app, &AcceptAll);
    let first = &app.finance.expenses[0];
    assert_eq!(first.id, "new-id");
    assert_eq!(first.amount, dec!(250));
    assert_eq!(first.category, "Food & Dining");
    assert_eq!(first.description, "Lunch with the team");
    assert_eq!(first.date, today());
    assert_eq!(app.finance.expenses.len(), 8);
}

#[test]
fn test_add_rejects_bad_input() {
    let mut app = app();
    handle_command("add -5 food Lunch", &mut app, &AcceptAll);
    assert!(app.status_message.starts_with("Invalid amount"));
    handle_command("add 5 groceries Lunch", &mut app, &AcceptAll);
    assert!(app.status_message.starts_with("Unknown category"));
    handle_command("add 5 food", &mut app, &AcceptAll);
    assert!(app.status_message.starts_with("Usage"));
    assert_eq!(app.finance.expenses.len(), 7);
}

#[test]
fn test_add_without_arguments_opens_form() {
    let mut app = app();
    handle_command("add", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Manage);
    assert_eq!(app.input_mode, InputMode::Form);
    assert_eq!(app.form.date, "2024-12-15");
}

#[test]
fn test_delete_asks_for_confirmation() {
    let mut app = app();
    handle_command("delete", &mut app, &AcceptAll);
    assert_eq!(app.status_message, "Navigate to Manage first");

    app.screen = Screen::Manage;
    handle_command("delete", &mut app, &AcceptAll);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteExpense {
            id: "1".to_string(),
            description: "Grocery shopping at SM".to_string(),
        })
    );
}

#[test]
fn test_filter_by_alias_and_clear() {
    let mut app = app();
    handle_command("filter transport", &mut app, &AcceptAll);
    assert_eq!(app.category_filter.as_deref(), Some("Transportation"));
    assert_eq!(app.filtered_expenses().len(), 2);

    handle_command("filter", &mut app, &AcceptAll);
    assert_eq!(app.category_filter, None);
    assert_eq!(app.filtered_expenses().len(), 7);
}

#[test]
fn test_filter_unknown_category_keeps_list() {
    let mut app = app();
    handle_command("filter travel", &mut app, &AcceptAll);
    assert_eq!(app.category_filter, None);
    assert!(app.status_message.starts_with("No expenses in 'Travel'"));
}

#[test]
fn test_day_selection() {
    let mut app = app();
    handle_command("day 2024-12-11", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Daily);
    assert_eq!(app.selected_day, NaiveDate::from_ymd_opt(2024, 12, 11).unwrap());

    handle_command("day -2", &mut app, &AcceptAll);
    assert_eq!(app.selected_day, NaiveDate::from_ymd_opt(2024, 12, 9).unwrap());

    handle_command("day today", &mut app, &AcceptAll);
    assert_eq!(app.selected_day, today());

    handle_command("day yesterday", &mut app, &AcceptAll);
    assert!(app.status_message.starts_with("Invalid date"));
}

// ── Money commands ────────────────────────────────────────────

#[test]
fn test_budget_must_be_positive() {
    let mut app = app();
    handle_command("budget 0", &mut app, &AcceptAll);
    assert_eq!(app.monthly_budget, dec!(35000));
    handle_command("budget ₱40,000", &mut app, &AcceptAll);
    assert_eq!(app.monthly_budget, dec!(40000));
}

#[test]
fn test_salary_and_savings_commands() {
    let mut app = app();
    handle_command("salary 65000", &mut app, &AcceptAll);
    assert_eq!(app.finance.salary.monthly, dec!(65000));

    handle_command("goal 120000", &mut app, &AcceptAll);
    handle_command("deposit 5000", &mut app, &AcceptAll);
    handle_command("withdraw 7000", &mut app, &AcceptAll);
    assert_eq!(app.screen, Screen::Savings);
    assert_eq!(app.finance.savings.goal, dec!(120000));
    assert_eq!(app.finance.savings.current, Decimal::ZERO);

    handle_command("deposit nothing", &mut app, &AcceptAll);
    assert!(app.status_message.starts_with("Usage: :deposit"));
}
