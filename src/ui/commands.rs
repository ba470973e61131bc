use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_amount, parse_amount};
use crate::client::FinanceApi;
use crate::models::{Category, NewExpense};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &dyn FinanceApi),
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("daily", "Go to Daily", cmd_daily, r);
    register_command!(
        "day",
        "Pick a day (e.g. :day 2024-12-15, :day today, :day -1)",
        cmd_day,
        r
    );
    register_command!(
        "salary",
        "Go to Salary, or set it (e.g. :salary 65000)",
        cmd_salary,
        r
    );
    register_command!("savings", "Go to Savings", cmd_savings, r);
    register_command!("goal", "Set savings goal (e.g. :goal 150000)", cmd_goal, r);
    register_command!("deposit", "Add to savings (e.g. :deposit 5000)", cmd_deposit, r);
    register_command!(
        "withdraw",
        "Take from savings (e.g. :withdraw 1000)",
        cmd_withdraw,
        r
    );
    register_command!("m", "Go to Manage", cmd_manage, r);
    register_command!("manage", "Go to Manage", cmd_manage, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 250 food Lunch), or open the form",
        cmd_add,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "filter",
        "Filter expenses by category (e.g. :filter food); no argument clears",
        cmd_filter,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 40000)",
        cmd_budget,
        r
    );
    register_command!("r", "Reload from the server", cmd_refresh, r);
    register_command!("refresh", "Reload from the server", cmd_refresh, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, api: &dyn FinanceApi) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return;
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app, api);
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parses a strictly positive amount, reporting `usage` otherwise.
fn positive_amount(args: &str, app: &mut App, usage: &str) -> Option<Decimal> {
    match parse_amount(args) {
        Some(amount) if amount > Decimal::ZERO => Some(amount),
        _ => {
            app.set_status(format!("Usage: {usage} (a positive amount)"));
            None
        }
    }
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.running = false;
}

fn cmd_overview(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Overview;
}

fn cmd_daily(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Daily;
}

fn cmd_manage(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Manage;
}

fn cmd_savings(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Savings;
}

fn cmd_help(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.show_help = true;
}

fn cmd_refresh(_args: &str, app: &mut App, api: &dyn FinanceApi) {
    app.refresh(api);
}

fn cmd_day(args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Daily;
    match args {
        "" | "today" => app.selected_day = app.today,
        _ if args.starts_with('+') || args.starts_with('-') => match args.parse::<i64>() {
            Ok(delta) => app.shift_day(delta),
            Err(_) => {
                app.set_status("Usage: :day <YYYY-MM-DD|today|+N|-N>");
                return;
            }
        },
        _ => match NaiveDate::parse_from_str(args, "%Y-%m-%d") {
            Ok(day) => app.selected_day = day,
            Err(_) => {
                app.set_status(format!("Invalid date: {args}. Use YYYY-MM-DD"));
                return;
            }
        },
    }
    let day = app.selected_day;
    app.set_status(format!("Day: {}", day.format("%A, %B %-d, %Y")));
}

// ── Expenses ─────────────────────────────────────────────────

fn cmd_add(args: &str, app: &mut App, api: &dyn FinanceApi) {
    if args.is_empty() {
        app.screen = Screen::Manage;
        app.form = super::app::ExpenseForm::new(app.today);
        app.input_mode = InputMode::Form;
        return;
    }

    let usage = "Usage: :add <amount> <category> <description>";
    let mut parts = args.splitn(3, ' ');
    let (Some(amount), Some(category), Some(description)) =
        (parts.next(), parts.next(), parts.next())
    else {
        app.set_status(usage);
        return;
    };

    let Some(amount) = parse_amount(amount).filter(|a| *a > Decimal::ZERO) else {
        app.set_status(format!("Invalid amount: {amount}. {usage}"));
        return;
    };
    let Some(category) = Category::parse(category) else {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Unknown category: {category}. Available: {}",
            names.join(", ")
        ));
        return;
    };
    let description = description.trim();
    if description.is_empty() {
        app.set_status(usage);
        return;
    }

    let new = NewExpense::new(
        amount,
        description.to_string(),
        category.as_str().to_string(),
        app.today,
    );
    let outcome = app.finance.add_expense(api, new);
    app.reset_selection();
    app.report(
        outcome,
        format!("Added {} for {description}", format_amount(amount)),
    );
}

fn cmd_delete(_args: &str, app: &mut App, _api: &dyn FinanceApi) {
    if app.screen != Screen::Manage {
        app.set_status("Navigate to Manage first");
        return;
    }

    if let Some(exp) = app.selected_expense() {
        let id = exp.id.clone();
        let description = exp.description.clone();
        app.confirm_message = format!("Delete '{description}'?");
        app.pending_action = Some(PendingAction::DeleteExpense { id, description });
        app.input_mode = InputMode::Confirm;
    } else {
        app.set_status("No expense selected");
    }
}

fn cmd_filter(args: &str, app: &mut App, _api: &dyn FinanceApi) {
    app.screen = Screen::Manage;
    app.reset_selection();

    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.category_filter = None;
        app.set_status("Showing all categories");
        return;
    }

    let present = app.present_categories();
    let wanted = Category::parse(args)
        .map(|c| c.as_str().to_string())
        .unwrap_or_else(|| args.to_string());
    match present.iter().find(|c| c.eq_ignore_ascii_case(&wanted)) {
        Some(found) => {
            app.set_status(format!("Filtering by category: {found}"));
            app.category_filter = Some(found.clone());
        }
        None => {
            app.set_status(format!(
                "No expenses in '{wanted}'. Available: {}",
                present.join(", ")
            ));
        }
    }
}

fn cmd_budget(args: &str, app: &mut App, _api: &dyn FinanceApi) {
    if let Some(amount) = positive_amount(args, app, ":budget <amount>") {
        app.monthly_budget = amount;
        app.set_status(format!("Monthly budget: {}", format_amount(amount)));
    }
}

// ── Salary & savings ─────────────────────────────────────────

fn cmd_salary(args: &str, app: &mut App, api: &dyn FinanceApi) {
    app.screen = Screen::Salary;
    if args.is_empty() {
        return;
    }
    if let Some(amount) = positive_amount(args, app, ":salary <amount>") {
        let outcome = app.finance.set_salary(api, amount);
        app.report(outcome, format!("Monthly salary: {}", format_amount(amount)));
    }
}

fn cmd_goal(args: &str, app: &mut App, api: &dyn FinanceApi) {
    app.screen = Screen::Savings;
    if let Some(amount) = positive_amount(args, app, ":goal <amount>") {
        let outcome = app.finance.set_goal(api, amount);
        app.report(outcome, format!("Savings goal: {}", format_amount(amount)));
    }
}

fn cmd_deposit(args: &str, app: &mut App, api: &dyn FinanceApi) {
    app.screen = Screen::Savings;
    if let Some(amount) = positive_amount(args, app, ":deposit <amount>") {
        let outcome = app.finance.deposit(api, amount);
        let balance = format_amount(app.finance.savings.current);
        app.report(outcome, format!("Deposited {}; balance {balance}", format_amount(amount)));
    }
}

fn cmd_withdraw(args: &str, app: &mut App, api: &dyn FinanceApi) {
    app.screen = Screen::Savings;
    if let Some(amount) = positive_amount(args, app, ":withdraw <amount>") {
        let outcome = app.finance.withdraw(api, amount);
        let balance = format_amount(app.finance.savings.current);
        app.report(outcome, format!("Withdrew {}; balance {balance}", format_amount(amount)));
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
