use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Expense;

const SAMPLE: &[(&str, i64, &str, &str, u32)] = &[
    ("1", 245050, "Grocery shopping at SM", "Food & Dining", 15),
    ("2", 120000, "Gasoline", "Transportation", 14),
    ("3", 54900, "Netflix subscription", "Entertainment", 13),
    ("4", 385000, "Electric bill", "Bills & Utilities", 12),
    ("5", 289000, "Dinner at Jollibee", "Food & Dining", 11),
    ("6", 85000, "Jeepney fare", "Transportation", 10),
    ("7", 165000, "Coffee shop", "Food & Dining", 9),
];

/// Demo expenses shown when the server cannot be reached on startup.
pub(crate) fn sample_expenses() -> Vec<Expense> {
    SAMPLE
        .iter()
        .filter_map(|&(id, centavos, description, category, day)| {
            Some(Expense {
                id: id.to_string(),
                amount: Decimal::new(centavos, 2),
                description: description.to_string(),
                category: category.to_string(),
                date: NaiveDate::from_ymd_opt(2024, 12, day)?,
                user_id: None,
                created_at: None,
            })
        })
        .collect()
}
