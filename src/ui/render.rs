use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    draw_tabs(f, tabs, app);
    draw_screen(f, body, app);
    draw_status(f, status, app);
    draw_command_line(f, command, app);

    if app.show_help {
        draw_help(f, f.area());
    }
}

/// Bordered block with the dim bold title used by every panel.
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, screen)| format!("{}:{screen}", i + 1));
    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(theme::OVERLAY)));

    f.render_widget(tabs, area);
}

fn draw_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Overview => super::screens::overview::render(f, area, app),
        Screen::Daily => super::screens::daily::render(f, area, app),
        Screen::Salary => super::screens::salary::render(f, area, app),
        Screen::Savings => super::screens::savings::render(f, area, app),
        Screen::Manage => super::screens::manage::render(f, area, app),
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Form => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} | {} expenses | {}",
        app.screen,
        app.current_month(),
        app.finance.expenses.len(),
        app.user_id
    );

    let right = match (app.screen, app.input_mode) {
        (_, InputMode::Form) => " Tab next field | h/l category | Enter save | Esc cancel ",
        (Screen::Overview, _) => " :budget set | r reload | ? help ",
        (Screen::Daily, _) => " h/l prev/next day | t today | ? help ",
        (Screen::Salary, _) => " :salary <amount> | ? help ",
        (Screen::Savings, _) => " :goal | :deposit | :withdraw | ? help ",
        (Screen::Manage, _) => " a add | D delete | f filter | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Form | InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let heading = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut lines = vec![
        Line::from(Span::styled(
            " Budget Tracker ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Keys"),
        row("  1-5 / Tab        Switch screen         Ctrl-q     Quit"),
        row("  j/k, Up/Down     Move selection        g/G        First/last"),
        row("  Ctrl-d/u         Page down/up          r          Reload from server"),
        row("  h/l, t (Daily)   Previous/next day, today"),
        row("  a, D, f (Manage) Add, delete, cycle category filter"),
        Line::from(""),
        heading(" Commands"),
    ];
    lines.extend(command_summary().into_iter().map(|(name, desc)| {
        Line::from(Span::styled(
            format!("  :{name:<10} {desc}"),
            theme::normal_style(),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" any key closes", theme::dim_style())));

    let popup = centered(area, 80, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}

/// One entry per command, listed under its longest alias.
fn command_summary() -> Vec<(&'static str, &'static str)> {
    let mut by_desc: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        let entry = by_desc.entry(cmd.description).or_insert(name);
        if name.len() > entry.len() || (name.len() == entry.len() && name < *entry) {
            *entry = name;
        }
    }
    let mut rows: Vec<_> = by_desc.into_iter().map(|(desc, name)| (name, desc)).collect();
    rows.sort_unstable();
    rows
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}
