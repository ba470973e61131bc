#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::*;
use crate::client::sample_expenses;
use crate::models::Category;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
}

fn filled_form() -> ExpenseForm {
    let mut form = ExpenseForm::new(day(15));
    form.amount = "1,250.50".to_string();
    form.description = "  Jeepney fare ".to_string();
    form.category = Some(Category::Transportation);
    form
}

// ── ExpenseForm ───────────────────────────────────────────────

#[test]
fn test_form_submit_builds_expense() {
    let new = filled_form().submit().unwrap();
    assert_eq!(new.amount, dec!(1250.50));
    assert_eq!(new.description, "Jeepney fare");
    assert_eq!(new.category, "Transportation");
    assert_eq!(new.date, day(15));
}

#[test]
fn test_form_requires_every_field() {
    let mut form = filled_form();
    form.amount.clear();
    assert_eq!(form.submit().unwrap_err(), "Enter an amount");

    let mut form = filled_form();
    form.amount = "0".to_string();
    assert_eq!(form.submit().unwrap_err(), "Amount must be greater than zero");

    let mut form = filled_form();
    form.description = "   ".to_string();
    assert_eq!(form.submit().unwrap_err(), "Enter a description");

    let mut form = filled_form();
    form.category = None;
    assert_eq!(form.submit().unwrap_err(), "Pick a category");

    let mut form = filled_form();
    form.date = "2024-13-01".to_string();
    assert_eq!(form.submit().unwrap_err(), "Date must be YYYY-MM-DD");
}

#[test]
fn test_form_field_navigation_wraps() {
    let mut form = ExpenseForm::new(day(1));
    form.prev_field();
    assert_eq!(form.field, FormField::Date);
    form.next_field();
    form.next_field();
    assert_eq!(form.field, FormField::Description);
}

#[test]
fn test_form_input_per_field() {
    let mut form = ExpenseForm::new(day(1));
    for c in "12a.5".chars() {
        form.push(c);
    }
    assert_eq!(form.amount, "12.5");

    form.field = FormField::Category;
    form.push(' ');
    assert_eq!(form.category, Some(Category::FoodDining));
    form.push('h');
    assert_eq!(form.category, Some(Category::Other));
    form.pop();
    assert_eq!(form.category, None);

    form.field = FormField::Date;
    form.pop();
    form.push('9');
    assert_eq!(form.date, "2024-12-09");
}

// ── App ───────────────────────────────────────────────────────

fn app() -> App {
    let mut app = App::new("demo-user-001", day(15));
    app.finance.expenses = sample_expenses();
    app
}

#[test]
fn test_month_spent_uses_current_month() {
    let app = app();
    assert_eq!(app.current_month(), "2024-12");
    assert_eq!(app.month_spent(), dec!(13439.50));
}

#[test]
fn test_cycle_filter_walks_present_categories() {
    let mut app = app();
    assert_eq!(
        app.present_categories(),
        vec!["Food & Dining", "Transportation", "Entertainment", "Bills & Utilities"]
    );
    app.cycle_filter();
    assert_eq!(app.category_filter.as_deref(), Some("Food & Dining"));
    assert_eq!(app.filtered_expenses().len(), 3);
    for _ in 0..3 {
        app.cycle_filter();
    }
    assert_eq!(app.category_filter.as_deref(), Some("Bills & Utilities"));
    app.cycle_filter();
    assert_eq!(app.category_filter, None);
}

#[test]
fn test_clamp_selection_after_shrink() {
    let mut app = app();
    app.expense_index = 6;
    app.expense_scroll = 6;
    app.finance.expenses.truncate(3);
    app.clamp_selection();
    assert_eq!(app.expense_index, 2);
    assert_eq!(app.expense_scroll, 2);
}

#[test]
fn test_shift_day() {
    let mut app = app();
    app.shift_day(-14);
    assert_eq!(app.selected_day, day(1));
    app.shift_day(3);
    assert_eq!(app.selected_day, day(4));
}
