#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_labels_round_trip() {
    for cat in Category::all() {
        assert_eq!(Category::parse(cat.as_str()), Some(*cat));
    }
}

#[test]
fn test_category_parse_case_insensitive() {
    assert_eq!(Category::parse("food & dining"), Some(Category::FoodDining));
    assert_eq!(Category::parse("  TRAVEL "), Some(Category::Travel));
}

#[test]
fn test_category_aliases() {
    assert_eq!(Category::parse("food"), Some(Category::FoodDining));
    assert_eq!(Category::parse("bills"), Some(Category::BillsUtilities));
    assert_eq!(Category::parse("transport"), Some(Category::Transportation));
}

#[test]
fn test_category_unknown() {
    assert_eq!(Category::parse("Groceries"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn test_category_order_matches_form() {
    assert_eq!(Category::all().len(), 9);
    assert_eq!(Category::all()[0], Category::FoodDining);
    assert_eq!(Category::Other.index(), 8);
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_new_expense_wire_format() {
    let json = r#"{"amount":2450.5,"description":"Grocery shopping at SM","category":"Food & Dining","date":"2024-12-15"}"#;
    let exp: NewExpense = serde_json::from_str(json).unwrap();
    assert_eq!(exp.amount, dec!(2450.50));
    assert_eq!(exp.date, day(2024, 12, 15));
    assert_eq!(exp.category, "Food & Dining");
}

#[test]
fn test_expense_serializes_camel_case() {
    let exp = NewExpense::new(dec!(100), "Lunch".into(), "Food & Dining".into(), day(2024, 1, 2))
        .into_expense("abc".into());
    let value = serde_json::to_value(&exp).unwrap();
    assert_eq!(value["id"], "abc");
    assert_eq!(value["amount"], 100.0);
    assert_eq!(value["date"], "2024-01-02");
    // Server-only fields are omitted when unset
    assert!(value.get("userId").is_none());
    assert!(value.get("createdAt").is_none());
}

#[test]
fn test_expense_month() {
    let exp = NewExpense::new(dec!(1), "x".into(), "Other".into(), day(2024, 3, 9))
        .into_expense("1".into());
    assert_eq!(exp.month(), "2024-03");
}

#[test]
fn test_expense_rejects_bad_date() {
    let json = r#"{"amount":1,"description":"x","category":"Other","date":"15/12/2024"}"#;
    assert!(serde_json::from_str::<NewExpense>(json).is_err());
}

// ── Salary / Savings ──────────────────────────────────────────

#[test]
fn test_salary_default() {
    let salary = Salary::default();
    assert_eq!(salary.monthly, dec!(50000));
    assert!(salary.last_updated.is_none());
    let value = serde_json::to_value(&salary).unwrap();
    assert!(value["lastUpdated"].is_null());
}

#[test]
fn test_savings_default() {
    let savings = Savings::default();
    assert_eq!(savings.goal, dec!(100000));
    assert_eq!(savings.current, Decimal::ZERO);
}

#[test]
fn test_savings_partial_update_keeps_other_fields() {
    let mut savings = Savings::default();
    let update: SavingsUpdate = serde_json::from_str(r#"{"current":1500}"#).unwrap();
    savings.apply(&update);
    assert_eq!(savings.current, dec!(1500));
    assert_eq!(savings.goal, dec!(100000));
}

#[test]
fn test_savings_deposit_and_withdraw() {
    let savings = Savings {
        current: dec!(1000),
        ..Savings::default()
    };
    assert_eq!(savings.deposit(dec!(250)).current, Some(dec!(1250)));
    assert_eq!(savings.withdraw(dec!(400)).current, Some(dec!(600)));
}

#[test]
fn test_savings_withdraw_clamps_at_zero() {
    let savings = Savings {
        current: dec!(100),
        ..Savings::default()
    };
    assert_eq!(savings.withdraw(dec!(500)).current, Some(Decimal::ZERO));
}

#[test]
fn test_savings_deposit_saturates_at_max() {
    let savings = Savings {
        current: Decimal::MAX,
        ..Savings::default()
    };
    assert_eq!(savings.deposit(Decimal::ONE).current, Some(Decimal::MAX));
    assert_eq!(savings.deposit(Decimal::MAX).current, Some(Decimal::MAX));
}

#[test]
fn test_savings_update_omits_unset_fields() {
    let update = Savings::default().with_goal(dec!(20000));
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["goal"], 20000.0);
    assert!(value.get("current").is_none());
}
