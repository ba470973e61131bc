#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, TimeZone};
use rust_decimal_macros::dec;
use serde_json::json;

use super::*;
use crate::kv::{MemoryKv, SqliteKv};

const USER: &str = "demo-user-001";

fn ledger() -> Ledger {
    Ledger::new(Arc::new(MemoryKv::new()))
}

fn lunch() -> NewExpense {
    NewExpense::new(
        dec!(250.75),
        "Lunch".into(),
        "Food & Dining".into(),
        NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
    )
}

// ── Ids ───────────────────────────────────────────────────────

#[test]
fn test_expense_id_format() {
    let now = Utc.with_ymd_and_hms(2024, 12, 15, 8, 0, 0).unwrap();
    let id = new_expense_id(now);
    let millis = now.timestamp_millis().to_string();
    assert!(id.starts_with(&millis));
    let suffix = &id[millis.len()..];
    assert_eq!(suffix.len(), 9);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn test_expense_ids_unique() {
    let now = Utc::now();
    let a = new_expense_id(now);
    let b = new_expense_id(now);
    assert_ne!(a, b);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_create_then_list() {
    let ledger = ledger();
    let id = ledger.add_expense(USER, lunch()).unwrap();

    let expenses = ledger.list_expenses(USER).unwrap();
    assert_eq!(expenses.len(), 1);
    let exp = &expenses[0];
    assert_eq!(exp.id, id);
    assert_eq!(exp.amount, dec!(250.75));
    assert_eq!(exp.description, "Lunch");
    assert_eq!(exp.user_id.as_deref(), Some(USER));
    assert!(exp.created_at.is_some());
}

#[test]
fn test_delete_removes_from_listing() {
    let ledger = ledger();
    let keep = ledger.add_expense(USER, lunch()).unwrap();
    let gone = ledger.add_expense(USER, lunch()).unwrap();

    ledger.delete_expense(USER, &gone).unwrap();

    let ids: Vec<String> = ledger
        .list_expenses(USER)
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn test_delete_unknown_id_is_ok() {
    let ledger = ledger();
    assert!(ledger.delete_expense(USER, "missing").is_ok());
}

#[test]
fn test_expenses_are_per_user() {
    let ledger = ledger();
    ledger.add_expense("alice", lunch()).unwrap();
    ledger.add_expense("bob", lunch()).unwrap();
    ledger.add_expense("bob", lunch()).unwrap();

    assert_eq!(ledger.list_expenses("alice").unwrap().len(), 1);
    assert_eq!(ledger.list_expenses("bob").unwrap().len(), 2);
    assert!(ledger.list_expenses("carol").unwrap().is_empty());
}

#[test]
fn test_list_skips_unreadable_values() {
    let store = Arc::new(MemoryKv::new());
    store
        .set("expenses:u:1", &json!({"amount": 5.0, "description": "ok", "category": "Other", "date": "2024-01-01"}))
        .unwrap();
    store.set("expenses:u:2", &json!({"garbage": true})).unwrap();

    let ledger = Ledger::new(store);
    let expenses = ledger.list_expenses("u").unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, "1");
}

#[test]
fn test_id_comes_from_key() {
    let store = Arc::new(MemoryKv::new());
    store
        .set("expenses:u:from-key", &json!({"id": "stale", "amount": 1.0, "description": "x", "category": "Other", "date": "2024-01-01"}))
        .unwrap();
    let ledger = Ledger::new(store);
    assert_eq!(ledger.list_expenses("u").unwrap()[0].id, "from-key");
}

#[test]
fn test_expenses_on_sqlite() {
    let ledger = Ledger::new(Arc::new(SqliteKv::open_in_memory().unwrap()));
    let id = ledger.add_expense(USER, lunch()).unwrap();
    let expenses = ledger.list_expenses(USER).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, id);
    assert_eq!(expenses[0].amount, dec!(250.75));
}

// ── Salary ────────────────────────────────────────────────────

#[test]
fn test_salary_default_when_missing() {
    let salary = ledger().salary(USER).unwrap();
    assert_eq!(salary, Salary::default());
}

#[test]
fn test_salary_overwrite_updates_timestamp() {
    let ledger = ledger();
    let before = Utc::now();
    ledger
        .set_salary(USER, SalaryUpdate { monthly: dec!(42000) })
        .unwrap();
    let first = ledger.salary(USER).unwrap();
    assert_eq!(first.monthly, dec!(42000));
    let first_stamp = first.last_updated.unwrap();
    assert!(first_stamp >= before);

    ledger
        .set_salary(USER, SalaryUpdate { monthly: dec!(65000) })
        .unwrap();
    let second = ledger.salary(USER).unwrap();
    assert_eq!(second.monthly, dec!(65000));
    assert!(second.last_updated.unwrap() >= first_stamp);
}

#[test]
fn test_unreadable_salary_reads_as_default() {
    let store = Arc::new(MemoryKv::new());
    store.set("salary:u", &json!({"monthly": "lots"})).unwrap();
    let ledger = Ledger::new(store);
    assert_eq!(ledger.salary("u").unwrap(), Salary::default());

    ledger
        .set_salary("u", SalaryUpdate { monthly: dec!(30000) })
        .unwrap();
    assert_eq!(ledger.salary("u").unwrap().monthly, dec!(30000));
}

// ── Savings ───────────────────────────────────────────────────

#[test]
fn test_savings_default_when_missing() {
    assert_eq!(ledger().savings(USER).unwrap(), Savings::default());
}

#[test]
fn test_savings_partial_update_merges() {
    let ledger = ledger();
    ledger
        .update_savings(
            USER,
            &SavingsUpdate {
                goal: Some(dec!(20000)),
                current: None,
            },
        )
        .unwrap();
    ledger
        .update_savings(
            USER,
            &SavingsUpdate {
                goal: None,
                current: Some(dec!(1500)),
            },
        )
        .unwrap();

    let savings = ledger.savings(USER).unwrap();
    assert_eq!(savings.goal, dec!(20000));
    assert_eq!(savings.current, dec!(1500));
    assert!(savings.last_updated.is_some());
}

#[test]
fn test_savings_full_update_overwrites() {
    let ledger = ledger();
    let update = SavingsUpdate {
        goal: Some(dec!(5000)),
        current: Some(dec!(4000)),
    };
    let stored = ledger.update_savings(USER, &update).unwrap();
    assert_eq!(stored.goal, dec!(5000));
    assert_eq!(stored.current, dec!(4000));
    assert_eq!(ledger.savings(USER).unwrap(), stored);
}

#[test]
fn test_unreadable_savings_can_be_repaired() {
    let store = Arc::new(MemoryKv::new());
    store.set("savings:u", &json!(["not", "a", "record"])).unwrap();
    let ledger = Ledger::new(store);
    assert_eq!(ledger.savings("u").unwrap(), Savings::default());

    let update = SavingsUpdate {
        goal: None,
        current: Some(dec!(800)),
    };
    let stored = ledger.update_savings("u", &update).unwrap();
    assert_eq!(stored.goal, Savings::default().goal);
    assert_eq!(stored.current, dec!(800));
    assert_eq!(ledger.savings("u").unwrap(), stored);
}
