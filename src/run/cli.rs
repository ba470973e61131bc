use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::analytics::{self, BudgetSummary, SalarySummary, SavingsSummary, DEFAULT_MONTHLY_BUDGET};
use crate::client::{ApiClient, FinanceApi, FinanceState, SyncOutcome};
use crate::config::Config;
use crate::models::{Category, NewExpense};
use crate::ui::util::{format_amount, format_percent, parse_amount, truncate};

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    let rest = args.get(2..).unwrap_or_default();
    match args.get(1).map(String::as_str).unwrap_or("--help") {
        "serve" => super::serve::serve(config, rest.iter().any(|a| a == "--memory")),
        "health" => cli_health(config),
        "list" | "ls" => cli_list(rest, config),
        "add" => cli_add(rest, config),
        "delete" | "rm" => cli_delete(rest, config),
        "summary" | "s" => cli_summary(rest, config),
        "salary" => cli_salary(rest, config),
        "savings" => cli_savings(rest, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budget-tracker {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Budget Tracker: expenses, salary and savings in pesos");
    println!();
    println!("Usage: budget-tracker [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  serve [--memory]                        Run the REST server");
    println!("  health                                  Ping the server");
    println!("  list [--month YYYY-MM] [--category C]   List expenses");
    println!("  add <YYYY-MM-DD> <amount> <category> <description...>");
    println!("                                          Record an expense");
    println!("  delete <id>                             Delete an expense");
    println!("  summary [YYYY-MM] [--budget N]          Month total, budget and categories");
    println!("  salary [amount]                         Show or set the monthly salary");
    println!("  savings [goal|add|withdraw <amount>]    Show or change savings");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    println!("Environment: BUDGET_API_URL, BUDGET_USER_ID, BUDGET_API_KEY, BUDGET_BIND,");
    println!("BUDGET_DB, BUDGET_PREFIX, BUDGET_TIMEOUT_SECS (also read from .env)");
}

fn client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(
        &config.api_url,
        &config.user_id,
        config.api_key.clone(),
        config.timeout,
    )
    .context("Failed to build HTTP client")
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn amount_arg(raw: Option<&String>, usage: &str) -> Result<Decimal> {
    let raw = raw.ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    parse_amount(raw).ok_or_else(|| anyhow::anyhow!("Invalid amount: {raw}"))
}

/// The CLI has no local fallback: anything short of a round trip is an error.
fn synced(outcome: SyncOutcome) -> Result<()> {
    match outcome {
        SyncOutcome::Synced => Ok(()),
        SyncOutcome::Invalid(msg) => bail!("{msg}"),
        SyncOutcome::LocalOnly(msg) | SyncOutcome::Unchanged(msg) => bail!("{msg}"),
    }
}

fn current_month() -> String {
    analytics::month_key(Local::now().date_naive())
}

fn cli_health(config: &Config) -> Result<()> {
    let health = client(config)?
        .health()
        .with_context(|| format!("Server at {} is not reachable", config.api_url))?;
    println!("{}: {} ({})", config.api_url, health.status, health.timestamp);
    Ok(())
}

fn cli_list(args: &[String], config: &Config) -> Result<()> {
    let month = flag(args, "--month");
    let category = flag(args, "--category")
        .map(|c| Category::parse(c).map_or_else(|| c.to_string(), |cat| cat.to_string()));

    let expenses = client(config)?.list_expenses()?;
    let shown: Vec<_> = expenses
        .iter()
        .filter(|e| month.map_or(true, |m| e.month() == m))
        .filter(|e| {
            category
                .as_deref()
                .map_or(true, |c| e.category.eq_ignore_ascii_case(c))
        })
        .collect();

    if shown.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<10}  {:<22}  {:<18}  {:>14}  Description",
        "Date", "ID", "Category", "Amount"
    );
    println!("{}", "─".repeat(90));
    for exp in &shown {
        println!(
            "{:<10}  {:<22}  {:<18}  {:>14}  {}",
            exp.date,
            truncate(&exp.id, 22),
            truncate(&exp.category, 18),
            format_amount(exp.amount),
            exp.description
        );
    }
    let total = analytics::total(shown.iter().map(|e| e.amount));
    println!("{}", "─".repeat(90));
    println!("{} expenses, total {}", shown.len(), format_amount(total));
    Ok(())
}

fn cli_add(args: &[String], config: &Config) -> Result<()> {
    let usage = "budget-tracker add <YYYY-MM-DD> <amount> <category> <description...>";
    if args.len() < 4 {
        bail!("Usage: {usage}");
    }

    let date = NaiveDate::parse_from_str(&args[0], "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {} (expected YYYY-MM-DD)", args[0]))?;
    let amount = amount_arg(args.get(1), usage)?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be greater than zero");
    }
    let category = Category::parse(&args[2]).ok_or_else(|| {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("Unknown category: {}. Available: {}", args[2], names.join(", "))
    })?;
    let description = args[3..].join(" ");

    let new = NewExpense::new(amount, description, category.to_string(), date);
    let id = client(config)?.add_expense(&new)?;
    println!(
        "Added {} for {} ({category}, {date}) as {id}",
        format_amount(new.amount),
        new.description
    );
    Ok(())
}

fn cli_delete(args: &[String], config: &Config) -> Result<()> {
    let Some(id) = args.first() else {
        bail!("Usage: budget-tracker delete <id>");
    };
    client(config)?.delete_expense(id)?;
    println!("Deleted {id}");
    Ok(())
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(current_month);
    let budget = match flag(args, "--budget") {
        Some(raw) => parse_amount(raw).ok_or_else(|| anyhow::anyhow!("Invalid budget: {raw}"))?,
        None => Decimal::from(DEFAULT_MONTHLY_BUDGET),
    };

    let api = client(config)?;
    let expenses = api.list_expenses()?;
    let in_month: Vec<_> = expenses
        .iter()
        .filter(|e| e.month() == month)
        .cloned()
        .collect();
    let spent = analytics::month_total(&expenses, &month);
    let budget_summary = BudgetSummary::new(budget, spent);
    let salary = SalarySummary::new(api.salary()?.monthly, spent);

    println!("Budget Tracker: {month}");
    println!("{}", "─".repeat(44));
    println!("  Budget:      {:>16}", format_amount(budget_summary.budget));
    println!("  Spent:       {:>16}", format_amount(budget_summary.spent));
    println!("  Remaining:   {:>16}", format_amount(budget_summary.remaining));
    println!("  Used:        {:>16}", format_percent(budget_summary.percent_used));
    if budget_summary.over_budget() {
        println!("  Over budget!");
    }
    println!("  Salary:      {:>16}", format_amount(salary.monthly));
    println!("  Saving rate: {:>16}", format_percent(salary.savings_rate));
    println!("  {}", salary.rating().advice());

    let split = analytics::category_totals(&in_month, analytics::TOP_CATEGORIES);
    if !split.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &split {
            println!("  {name:<20} {:>16}", format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_salary(args: &[String], config: &Config) -> Result<()> {
    let api = client(config)?;
    let mut state = FinanceState::default();

    if let Some(raw) = args.first() {
        let amount = amount_arg(Some(raw), "budget-tracker salary [amount]")?;
        synced(state.set_salary(&api, amount))?;
        println!("Monthly salary set to {}", format_amount(amount));
        return Ok(());
    }

    synced(state.refresh_salary(&api))?;
    synced(state.refresh_expenses(&api))?;
    let month = current_month();
    let summary = SalarySummary::new(
        state.salary.monthly,
        analytics::month_total(&state.expenses, &month),
    );
    println!("Monthly salary:  {:>16}", format_amount(summary.monthly));
    if let Some(updated) = state.salary.last_updated {
        println!("Last updated:    {:>16}", updated.format("%Y-%m-%d"));
    }
    println!("Spent ({month}): {:>16}", format_amount(summary.expenses));
    println!("Remaining:       {:>16}", format_amount(summary.remaining));
    println!("Savings rate:    {:>16}", format_percent(summary.savings_rate));
    println!("{}", summary.rating().advice());
    Ok(())
}

fn cli_savings(args: &[String], config: &Config) -> Result<()> {
    let usage = "budget-tracker savings [goal|add|withdraw <amount>]";
    let api = client(config)?;
    let mut state = FinanceState::default();
    synced(state.refresh_savings(&api))?;

    if let Some(action) = args.first() {
        let amount = amount_arg(args.get(1), usage)?;
        let outcome = match action.as_str() {
            "goal" => state.set_goal(&api, amount),
            "add" | "deposit" => state.deposit(&api, amount),
            "withdraw" => state.withdraw(&api, amount),
            other => bail!("Unknown savings action: {other}. Usage: {usage}"),
        };
        synced(outcome)?;
    }

    let savings = &state.savings;
    let summary = SavingsSummary::new(savings);
    println!("Goal:      {:>16}", format_amount(savings.goal));
    println!("Saved:     {:>16}", format_amount(savings.current));
    println!("Progress:  {:>16}", format_percent(summary.progress_percent));
    if summary.achieved() {
        println!("Goal reached!");
    } else {
        println!(
            "Remaining: {:>16}  (about {} months at {} a month)",
            format_amount(summary.remaining),
            summary.months_to_goal,
            format_amount(analytics::MONTHLY_SAVINGS_PACE.into())
        );
    }
    Ok(())
}
