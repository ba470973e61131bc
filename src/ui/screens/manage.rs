use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, FormField, InputMode};
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(area);

    render_form(f, cols[0], app);
    render_list(f, cols[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Form;
    let form = &app.form;

    let mut lines = vec![Line::from("")];
    for field in FormField::all() {
        let value = match field {
            FormField::Amount => format!("₱ {}", form.amount),
            FormField::Description => form.description.clone(),
            FormField::Category => match form.category {
                Some(cat) => format!("◀ {cat} ▶"),
                None => "◀ select ▶".to_string(),
            },
            FormField::Date => form.date.clone(),
        };
        let focused = editing && form.field == *field;
        let label_style = if focused {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_style = if focused {
            theme::selected_style()
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(Span::styled(format!(" {}", field.label()), label_style)));
        lines.push(Line::from(Span::styled(
            format!(" {:<38}", truncate(&value, 38)),
            value_style,
        )));
        lines.push(Line::from(""));
    }
    if !editing {
        lines.push(Line::from(Span::styled(
            " Press a (or :add) to fill in a new expense",
            theme::dim_style(),
        )));
    }

    let title = if editing { "Add New Expense *" } else { "Add New Expense" };
    f.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let expenses = app.filtered_expenses();
    let filter_label = app.category_filter.as_deref().unwrap_or("All Categories");
    let title = format!("Recent Expenses ({}) [{filter_label}]", expenses.len());

    if expenses.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses found. Add your first expense with a or :add",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(&title));
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["Date", "Description", "Category", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, exp)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(exp.date.format("%b %-d, %Y").to_string()),
                Cell::from(truncate(&exp.description, 36)),
                Cell::from(Span::styled(
                    exp.category.clone(),
                    Style::default().fg(theme::category_color(&exp.category)),
                )),
                Cell::from(format_amount(exp.amount)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}
