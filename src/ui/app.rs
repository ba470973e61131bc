use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::analytics::{self, DEFAULT_MONTHLY_BUDGET};
use crate::client::{FinanceApi, FinanceState, SyncOutcome};
use crate::models::{Category, Expense, NewExpense};

use super::util::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Daily,
    Salary,
    Savings,
    Manage,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Daily,
            Self::Salary,
            Self::Savings,
            Self::Manage,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Daily => write!(f, "Daily"),
            Self::Salary => write!(f, "Salary"),
            Self::Savings => write!(f, "Savings"),
            Self::Manage => write!(f, "Manage"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: String, description: String },
}

// ── Expense form ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Description,
    Category,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Amount, Self::Description, Self::Category, Self::Date]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Amount => "Amount (₱)",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) category: Option<Category>,
    pub(crate) date: String,
    pub(crate) field: FormField,
}

impl ExpenseForm {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category: None,
            date: today.format("%Y-%m-%d").to_string(),
            field: FormField::Amount,
        }
    }

    pub(crate) fn next_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(idx + 1) % fields.len()];
    }

    pub(crate) fn prev_field(&mut self) {
        let fields = FormField::all();
        let idx = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Steps through the category list; the first step from "unset" lands on
    /// the first (or last) entry.
    pub(crate) fn cycle_category(&mut self, forward: bool) {
        let all = Category::all();
        let next = match self.category {
            None if forward => 0,
            None => all.len() - 1,
            Some(cat) if forward => (cat.index() + 1) % all.len(),
            Some(cat) => (cat.index() + all.len() - 1) % all.len(),
        };
        self.category = Some(all[next]);
    }

    pub(crate) fn push(&mut self, c: char) {
        match self.field {
            FormField::Amount => {
                if c.is_ascii_digit() || c == '.' || c == ',' {
                    self.amount.push(c);
                }
            }
            FormField::Description => self.description.push(c),
            FormField::Date => {
                if c.is_ascii_digit() || c == '-' {
                    self.date.push(c);
                }
            }
            FormField::Category => match c {
                ' ' | 'l' => self.cycle_category(true),
                'h' => self.cycle_category(false),
                _ => {}
            },
        }
    }

    pub(crate) fn pop(&mut self) {
        match self.field {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Category => self.category = None,
        }
    }

    /// Every field is required; the amount must be a positive number.
    pub(crate) fn submit(&self) -> Result<NewExpense, &'static str> {
        let amount = parse_amount(&self.amount).ok_or("Enter an amount")?;
        if amount <= Decimal::ZERO {
            return Err("Amount must be greater than zero");
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Enter a description");
        }
        let category = self.category.ok_or("Pick a category")?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be YYYY-MM-DD")?;
        Ok(NewExpense::new(
            amount,
            description.to_string(),
            category.as_str().to_string(),
            date,
        ))
    }
}

// ── App ──────────────────────────────────────────────────────

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) user_id: String,
    pub(crate) today: NaiveDate,

    pub(crate) finance: FinanceState,
    /// Kept on this screen only; the server does not store budgets.
    pub(crate) monthly_budget: Decimal,

    // Daily
    pub(crate) selected_day: NaiveDate,

    // Manage
    pub(crate) category_filter: Option<String>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) form: ExpenseForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(user_id: &str, today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            user_id: user_id.to_string(),
            today,

            finance: FinanceState::default(),
            monthly_budget: Decimal::from(DEFAULT_MONTHLY_BUDGET),

            selected_day: today,

            category_filter: None,
            expense_index: 0,
            expense_scroll: 0,
            form: ExpenseForm::new(today),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn current_month(&self) -> String {
        analytics::month_key(self.today)
    }

    pub(crate) fn month_spent(&self) -> Decimal {
        analytics::month_total(&self.finance.expenses, &self.current_month())
    }

    /// Expenses shown on the Manage list, after the category filter.
    pub(crate) fn filtered_expenses(&self) -> Vec<&Expense> {
        self.finance
            .expenses
            .iter()
            .filter(|e| {
                self.category_filter
                    .as_deref()
                    .map_or(true, |cat| e.category == cat)
            })
            .collect()
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.filtered_expenses().get(self.expense_index).copied()
    }

    /// Distinct categories present in the loaded expenses, first-seen order.
    pub(crate) fn present_categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for exp in &self.finance.expenses {
            if !seen.contains(&exp.category) {
                seen.push(exp.category.clone());
            }
        }
        seen
    }

    /// Cycles All → each present category → All.
    pub(crate) fn cycle_filter(&mut self) {
        let cats = self.present_categories();
        self.category_filter = match &self.category_filter {
            None => cats.first().cloned(),
            Some(current) => cats
                .iter()
                .position(|c| c == current)
                .and_then(|i| cats.get(i + 1))
                .cloned(),
        };
        self.reset_selection();
    }

    pub(crate) fn shift_day(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.selected_day.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.selected_day.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(day) = moved {
            self.selected_day = day;
        }
    }

    pub(crate) fn reset_selection(&mut self) {
        self.expense_index = 0;
        self.expense_scroll = 0;
    }

    /// Keeps the cursor inside the list after it shrinks.
    pub(crate) fn clamp_selection(&mut self) {
        let len = self.filtered_expenses().len();
        if self.expense_index >= len {
            self.expense_index = len.saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn refresh(&mut self, api: &dyn FinanceApi) {
        let outcome = self.finance.refresh_all(api);
        self.clamp_selection();
        let count = self.finance.expenses.len();
        self.report(outcome, format!("Loaded {count} expenses"));
    }

    /// Shows the result of a server round trip in the status bar.
    pub(crate) fn report(&mut self, outcome: SyncOutcome, done: impl Into<String>) {
        match outcome {
            SyncOutcome::Synced => self.set_status(done),
            SyncOutcome::LocalOnly(msg) | SyncOutcome::Unchanged(msg) => self.set_status(msg),
            SyncOutcome::Invalid(msg) => self.set_status(msg),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
