use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::analytics::{SalarySummary, SavingsRating};
use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, gauge_ratio};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = SalarySummary::new(app.finance.salary.monthly, app.month_spent());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(chunks[0]);

    let updated = app
        .finance
        .salary
        .last_updated
        .map(|t| format!("Updated {}", t.format("%Y-%m-%d")))
        .unwrap_or_else(|| "Default amount".to_string());
    card(f, cards[0], "Monthly Salary", summary.monthly, theme::ACCENT, &updated);
    card(
        f,
        cards[1],
        "Expenses This Month",
        summary.expenses,
        theme::RED,
        &format!("{} of salary", format_percent(summary.expense_percent)),
    );
    let remaining_color = if summary.remaining < Decimal::ZERO {
        theme::RED
    } else {
        theme::GREEN
    };
    card(
        f,
        cards[2],
        "Remaining",
        summary.remaining,
        remaining_color,
        "after this month's expenses",
    );

    let spent = Gauge::default()
        .block(panel("Salary Spent"))
        .gauge_style(Style::default().fg(theme::RED).bg(theme::SURFACE))
        .ratio(gauge_ratio(summary.expense_percent))
        .label(format_percent(summary.expense_percent));
    f.render_widget(spent, chunks[1]);

    let rating = summary.rating();
    let rating_color = match rating {
        SavingsRating::Great => theme::GREEN,
        SavingsRating::Good => theme::YELLOW,
        SavingsRating::Low => theme::RED,
    };
    let rate = Gauge::default()
        .block(panel("Savings Rate"))
        .gauge_style(Style::default().fg(rating_color).bg(theme::SURFACE))
        .ratio(gauge_ratio(summary.savings_rate))
        .label(format_percent(summary.savings_rate));
    f.render_widget(rate, chunks[2]);

    let advice = Paragraph::new(vec![
        Line::from(Span::styled(
            rating.advice(),
            Style::default().fg(rating_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Set your salary with :salary <amount>",
            theme::dim_style(),
        )),
    ])
    .block(panel("Insight"));
    f.render_widget(advice, chunks[3]);
}

fn card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    note: &str,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(note.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(text, area);
}
