use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::client::{ApiClient, FinanceApi};
use crate::config::Config;
use crate::ui::app::{App, ExpenseForm, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(config: &Config) -> Result<()> {
    let api = ApiClient::new(
        &config.api_url,
        &config.user_id,
        config.api_key.clone(),
        config.timeout,
    )?;
    tracing::info!(api = %config.api_url, user = api.user_id(), "starting terminal UI");

    let mut app = App::new(api.user_id(), Local::now().date_naive());
    app.refresh(&api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &api);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal UI failed");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &dyn FinanceApi,
) -> Result<()> {
    while app.running {
        app.today = Local::now().date_naive();
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, api),
                InputMode::Command => handle_command_input(key, app, api),
                InputMode::Form => handle_form_input(key, app, api),
                InputMode::Confirm => handle_confirm_input(key, app, api),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('1') => app.screen = Screen::Overview,
        KeyCode::Char('2') => app.screen = Screen::Daily,
        KeyCode::Char('3') => app.screen = Screen::Salary,
        KeyCode::Char('4') => app.screen = Screen::Savings,
        KeyCode::Char('5') => app.screen = Screen::Manage,
        KeyCode::Tab => cycle_screen(app, true),
        KeyCode::BackTab => cycle_screen(app, false),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') if app.screen == Screen::Manage => {
            scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('G') if app.screen == Screen::Manage => {
            let len = app.filtered_expenses().len();
            let page = app.visible_rows.max(1);
            scroll_to_bottom(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        KeyCode::Char('h') | KeyCode::Left if app.screen == Screen::Daily => app.shift_day(-1),
        KeyCode::Char('l') | KeyCode::Right if app.screen == Screen::Daily => app.shift_day(1),
        KeyCode::Char('t') if app.screen == Screen::Daily => app.selected_day = app.today,
        KeyCode::Char('a') if app.screen == Screen::Manage => {
            app.form = ExpenseForm::new(app.today);
            app.input_mode = InputMode::Form;
        }
        KeyCode::Char('D') | KeyCode::Delete if app.screen == Screen::Manage => {
            commands::handle_command("delete", app, api);
        }
        KeyCode::Char('f') if app.screen == Screen::Manage => {
            app.cycle_filter();
            let msg = format!(
                "Filter: {}",
                app.category_filter.as_deref().unwrap_or("All Categories")
            );
            app.set_status(msg);
        }
        KeyCode::Char('r') => app.refresh(api),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, api);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Enter => match app.form.submit() {
            Ok(new) => {
                let label = format!(
                    "Added {} for {}",
                    crate::ui::util::format_amount(new.amount),
                    new.description
                );
                let outcome = app.finance.add_expense(api, new);
                app.form = ExpenseForm::new(app.today);
                app.input_mode = InputMode::Normal;
                app.reset_selection();
                app.report(outcome, label);
            }
            Err(msg) => app.set_status(msg),
        },
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left => app.form.cycle_category(false),
        KeyCode::Right => app.form.cycle_category(true),
        KeyCode::Backspace => app.form.pop(),
        KeyCode::Char(c) => app.form.push(c),
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, api: &dyn FinanceApi) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::DeleteExpense { id, description }) =
                app.pending_action.take()
            {
                let outcome = app.finance.delete_expense(api, &id);
                app.clamp_selection();
                app.report(outcome, format!("Deleted: {description}"));
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(app: &mut App, forward: bool) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    let next = if forward {
        (idx + 1) % screens.len()
    } else {
        (idx + screens.len() - 1) % screens.len()
    };
    app.screen = screens[next];
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Manage => {
            let len = app.filtered_expenses().len();
            let page = app.visible_rows.max(1);
            scroll_down(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        Screen::Daily => app.shift_day(1),
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Manage => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Daily => app.shift_day(-1),
        _ => {}
    }
}
