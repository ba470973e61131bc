use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::analytics::{self, DailyComparison};
use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let expenses = &app.finance.expenses;
    let comparison = DailyComparison::new(expenses, app.selected_day, app.today);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_day_total(f, top[0], app, &comparison);
    render_week(f, top[1], app, &comparison);
    render_day_categories(f, bottom[0], app);
    render_day_list(f, bottom[1], app);
}

fn render_day_total(f: &mut Frame, area: Rect, app: &App, cmp: &DailyComparison) {
    let (arrow, color, word) = if cmp.above_average() {
        ("▲", theme::RED, "above")
    } else {
        ("▼", theme::GREEN, "below")
    };
    let lines = vec![
        Line::from(Span::styled(
            format_amount(cmp.total),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{arrow} {word} the 7-day average of {}", format_amount(cmp.average)),
            Style::default().fg(color),
        )),
    ];
    let title = app.selected_day.format("%a, %b %-d %Y").to_string();
    f.render_widget(Paragraph::new(lines).centered().block(panel(&title)), area);
}

fn render_week(f: &mut Frame, area: Rect, app: &App, cmp: &DailyComparison) {
    let bars: Vec<Bar> = cmp
        .week
        .iter()
        .map(|(day, total)| {
            let color = if *day == app.selected_day {
                theme::YELLOW
            } else {
                theme::ACCENT
            };
            Bar::default()
                .value(total.round().to_u64().unwrap_or(0))
                .label(Line::from(day.format("%a").to_string()))
                .text_value(String::new())
                .style(Style::default().fg(color))
        })
        .collect();

    let title = format!("Last 7 Days: {}", format_amount(cmp.week_total));
    let chart = BarChart::default()
        .block(panel(&title))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Vertical)
        .bar_width(5)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_day_categories(f: &mut Frame, area: Rect, app: &App) {
    let totals = analytics::day_category_totals(&app.finance.expenses, app.selected_day);
    let lines: Vec<Line> = if totals.is_empty() {
        vec![Line::from(Span::styled("No spending", theme::dim_style()))]
    } else {
        totals
            .iter()
            .map(|(name, total)| {
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(theme::category_color(name))),
                    Span::styled(format!("{:<20}", truncate(name, 20)), theme::normal_style()),
                    Span::styled(format_amount(*total), theme::expense_style()),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines).block(panel("By Category")), area);
}

fn render_day_list(f: &mut Frame, area: Rect, app: &App) {
    let day_expenses = analytics::expenses_on(&app.finance.expenses, app.selected_day);
    if day_expenses.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses on this day", theme::dim_style())),
            Line::from(Span::styled(
                "h/l to move between days, :day <YYYY-MM-DD> to jump",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel("Expenses (0)"));
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["Description", "Category", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = day_expenses
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&exp.description, 30)),
                Cell::from(Span::styled(
                    exp.category.clone(),
                    Style::default().fg(theme::category_color(&exp.category)),
                )),
                Cell::from(Span::styled(format_amount(exp.amount), theme::expense_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(14),
    ];
    let title = format!("Expenses ({})", day_expenses.len());
    f.render_widget(Table::new(rows, widths).header(header).block(panel(&title)), area);
}
