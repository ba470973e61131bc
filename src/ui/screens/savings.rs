use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::analytics::{SavingsSummary, MONTHLY_SAVINGS_PACE};
use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, gauge_ratio};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let savings = &app.finance.savings;
    let summary = SavingsSummary::new(savings);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(6),
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

    let amount_card = |title: &str, text: String, color| {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .centered()
        .block(panel(title))
    };
    f.render_widget(
        amount_card("Goal", format_amount(savings.goal), theme::ACCENT),
        cards[0],
    );
    f.render_widget(
        amount_card("Saved", format_amount(savings.current), theme::GREEN),
        cards[1],
    );
    f.render_widget(
        amount_card(
            "Still Needed",
            format_amount(summary.remaining.max(rust_decimal::Decimal::ZERO)),
            theme::YELLOW,
        ),
        cards[2],
    );

    let color = if summary.achieved() {
        theme::GREEN
    } else {
        theme::ACCENT
    };
    let progress = Gauge::default()
        .block(panel("Progress"))
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
        .ratio(gauge_ratio(summary.progress_percent))
        .label(format_percent(summary.progress_percent));
    f.render_widget(progress, chunks[1]);

    let headline = if summary.achieved() {
        Line::from(Span::styled(
            "Goal reached! Set a new one with :goal <amount>",
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!("About {} months", summary.months_to_goal),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " to go at {} a month",
                    format_amount(MONTHLY_SAVINGS_PACE.into())
                ),
                theme::dim_style(),
            ),
        ])
    };
    let updated = savings
        .last_updated
        .map(|t| format!("Last updated {}", t.format("%Y-%m-%d %H:%M")))
        .unwrap_or_else(|| "Not saved yet".to_string());

    let details = Paragraph::new(vec![
        headline,
        Line::from(""),
        Line::from(Span::styled(updated, theme::dim_style())),
        Line::from(Span::styled(
            ":goal <amount>  :deposit <amount>  :withdraw <amount>",
            theme::dim_style(),
        )),
    ])
    .block(panel("Outlook"));
    f.render_widget(details, chunks[2]);
}
