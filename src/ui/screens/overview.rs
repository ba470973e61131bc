use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Gauge, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::{self, BudgetSummary, MONTHS_SHOWN, TOP_CATEGORIES};
use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, gauge_ratio, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Budget cards
            Constraint::Min(10),   // Monthly bars + category split
            Constraint::Length(5), // 30-day trend
        ])
        .split(area);

    let summary = BudgetSummary::new(app.monthly_budget, app.month_spent());
    render_budget_cards(f, chunks[0], &summary);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_monthly_chart(f, middle[0], app);
    render_category_split(f, middle[1], app);

    render_trend(f, chunks[2], app);
}

fn render_budget_cards(f: &mut Frame, area: Rect, summary: &BudgetSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Monthly Budget",
        format_amount(summary.budget),
        theme::ACCENT,
        ":budget <amount> to change".to_string(),
    );
    render_card(
        f,
        cards[1],
        "Spent This Month",
        format_amount(summary.spent),
        theme::RED,
        format!("{} of budget", format_percent(summary.percent_used)),
    );

    let (color, note) = if summary.over_budget() {
        (theme::RED, "Over budget")
    } else {
        (theme::GREEN, "Within budget")
    };
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(cards[2]);
    render_card(
        f,
        inner[0],
        "Remaining",
        format_amount(summary.remaining),
        color,
        note.to_string(),
    );
    let gauge = Gauge::default()
        .block(panel("Used"))
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
        .ratio(gauge_ratio(summary.percent_used))
        .label(format_percent(summary.percent_used));
    f.render_widget(gauge, inner[1]);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn whole_pesos(amount: Decimal) -> u64 {
    amount.round().to_u64().unwrap_or(0)
}

fn render_monthly_chart(f: &mut Frame, area: Rect, app: &App) {
    let months = analytics::monthly_totals(&app.finance.expenses, MONTHS_SHOWN);
    if months.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Monthly Spending"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = months
        .iter()
        .map(|(month, total)| {
            Bar::default()
                .value(whole_pesos(*total))
                .label(Line::from(month.clone()))
                .text_value(format_amount(*total))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Monthly Spending"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .value_style(Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD));

    f.render_widget(chart, area);
}

fn render_category_split(f: &mut Frame, area: Rect, app: &App) {
    let totals = analytics::category_totals(&app.finance.expenses, TOP_CATEGORIES);
    let grand = analytics::total(totals.iter().map(|(_, t)| *t));

    let lines: Vec<Line> = if totals.is_empty() {
        vec![Line::from(Span::styled("Nothing to split yet", theme::dim_style()))]
    } else {
        totals
            .iter()
            .map(|(name, total)| {
                let share = analytics::percent(*total, grand);
                let width = (gauge_ratio(share) * 20.0).round() as usize;
                Line::from(vec![
                    Span::styled(format!("{:<18}", truncate(name, 18)), theme::normal_style()),
                    Span::styled(
                        format!("{:<20}", "█".repeat(width)),
                        Style::default().fg(theme::category_color(name)),
                    ),
                    Span::styled(
                        format!(" {:>7} {}", format_percent(share), format_amount(*total)),
                        theme::dim_style(),
                    ),
                ])
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(panel("By Category")), area);
}

fn render_trend(f: &mut Frame, area: Rect, app: &App) {
    let days = analytics::trailing_days(&app.finance.expenses, app.today, 30);
    let total = analytics::total(days.iter().map(|(_, t)| *t));
    let data: Vec<u64> = days.iter().map(|(_, t)| whole_pesos(*t)).collect();

    let sparkline = Sparkline::default()
        .block(panel(&format!("Last 30 Days: {}", format_amount(total))))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
