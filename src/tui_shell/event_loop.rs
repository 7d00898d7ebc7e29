use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::form::SubDocKind;
use crate::shell::{MenuKind, Screen};

use super::app::App;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.pending.is_some() {
        handle_pending_key(app, key);
        return;
    }
    if app.input_target.is_some() {
        handle_input_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,

        KeyCode::Char('1') => app.select_menu(MenuKind::Routes),
        KeyCode::Char('2') => app.select_menu(MenuKind::ApiClients),
        KeyCode::Char('3') => app.select_menu(MenuKind::Factories),

        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),

        KeyCode::Char('/') => {
            if app.screen() != Screen::RouteForm {
                app.begin_search();
            }
        }
        KeyCode::Char('r') => {
            if app.screen() != Screen::RouteForm {
                app.refresh_active();
            }
        }

        _ => match app.screen() {
            Screen::RouteList => handle_route_list_key(app, key),
            Screen::ClientList => handle_client_list_key(app, key),
            Screen::RouteForm => handle_form_key(app, key),
            Screen::FactoryList => {}
        },
    }
}

fn handle_route_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('e') => app.toggle_selected(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_client_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.begin_new_client(),
        KeyCode::Enter => app.begin_edit_client(),
        KeyCode::Char('e') => app.toggle_selected(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.begin_edit_form_row(),
        KeyCode::Char('p') => app.add_sub_document(SubDocKind::Predicate),
        KeyCode::Char('f') => app.add_sub_document(SubDocKind::Filter),
        KeyCode::Char('x') => app.remove_selected_sub_document(),
        KeyCode::Char('s') => app.submit_form(),
        KeyCode::Esc => app.close_form(),
        _ => {}
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.commit_input(),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Char(c) => app.input.insert_char(c),
        _ => {}
    }
}

fn handle_pending_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.run_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending = None;
        }
        _ => {}
    }
}
