use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::effects::spawn_request;
use crate::app::fields::{Editable, FormMode};
use crate::app::form::FormFocus;
use crate::app::keymap::KeyAction;
use crate::app::page::{Page, PaneFocus};
use crate::app::{ActivePage, AppRequest, AppResponse, AppState, InputMode, Request};
use crate::ui;

/// Draw, drain finished requests, poll one key; repeat until quit.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    first: AppRequest,
    api: &ApiClient,
    runtime: &Handle,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppResponse>();
    spawn_request(runtime, api, first, &tx);

    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        while let Ok(response) = rx.try_recv() {
            if let Some(next) = apply_response(app, response) {
                spawn_request(runtime, api, next, &tx);
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(req) = handle_key(app, key) {
                        spawn_request(runtime, api, req, &tx);
                    }
                }
            }
        }

        if app.should_quit {
            tracing::info!("quitting");
            break;
        }
    }

    Ok(())
}

/// Feed a finished request to the mounted page. Responses for another route are dropped.
pub fn apply_response(app: &mut AppState, response: AppResponse) -> Option<AppRequest> {
    match (&mut app.page, response) {
        (ActivePage::Products(page), AppResponse::Products(resp)) => page.apply(resp).map(AppRequest::Products),
        (ActivePage::Users(page), AppResponse::Users(resp)) => page.apply(resp).map(AppRequest::Users),
        _ => {
            tracing::debug!("dropping response for unmounted route");
            None
        }
    }
}

/// Handle one key press. Returns the request it triggered, if any.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<AppRequest> {
    let mode = app.input_mode();
    let action = match mode {
        InputMode::Normal => {
            let action = app.keymap.resolve(&key)?;
            match action {
                KeyAction::Quit => {
                    app.should_quit = true;
                    return None;
                }
                KeyAction::SwitchTab => {
                    let next = app.route().next();
                    return Some(app.navigate(next));
                }
                other => Some(other),
            }
        }
        InputMode::Form | InputMode::Confirm => {
            // Ctrl-chorded quit bindings cannot collide with typed text; raw mode has no SIGINT.
            let chorded = key.modifiers.contains(KeyModifiers::CONTROL);
            if chorded && app.keymap.resolve(&key) == Some(KeyAction::Quit) {
                app.should_quit = true;
                return None;
            }
            None
        }
    };
    match &mut app.page {
        ActivePage::Products(page) => page_key(page, mode, key, action).map(AppRequest::Products),
        ActivePage::Users(page) => page_key(page, mode, key, action).map(AppRequest::Users),
    }
}

fn page_key<E: Editable>(
    page: &mut Page<E>,
    mode: InputMode,
    key: KeyEvent,
    action: Option<KeyAction>,
) -> Option<Request<E>> {
    match mode {
        InputMode::Normal => list_action(page, action?),
        InputMode::Form => form_key(page, key),
        InputMode::Confirm => confirm_key(page, key),
    }
}

fn list_action<E: Editable>(page: &mut Page<E>, action: KeyAction) -> Option<Request<E>> {
    match action {
        KeyAction::MoveUp => page.list.select_prev(),
        KeyAction::MoveDown => page.list.select_next(),
        KeyAction::FocusForm => page.focus = PaneFocus::Form,
        KeyAction::EditSelection => page.edit_selected(),
        KeyAction::DeleteSelection => {
            page.list.request_delete();
        }
        KeyAction::Reload => return Some(page.remount_list()),
        KeyAction::Quit | KeyAction::SwitchTab | KeyAction::Ignore => {}
    }
    None
}

fn form_key<E: Editable>(page: &mut Page<E>, key: KeyEvent) -> Option<Request<E>> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => page.submit(),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => {
            if page.form.mode() == FormMode::Edit {
                return page.cancel_edit();
            }
            page.focus = PaneFocus::List;
        }
        KeyCode::Tab | KeyCode::Down => page.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => page.form.focus_prev(),
        KeyCode::Enter => match page.form.focus {
            FormFocus::Field(_) => page.form.focus_next(),
            FormFocus::Submit => return page.submit(),
            FormFocus::Cancel => return page.cancel_edit(),
        },
        KeyCode::Backspace => page.form.backspace(),
        KeyCode::Char(' ') => {
            if !page.form.toggle() {
                page.form.insert_char(' ');
            }
        }
        KeyCode::Char(c) => page.form.insert_char(c),
        _ => {}
    }
    None
}

fn confirm_key<E: Editable>(page: &mut Page<E>, key: KeyEvent) -> Option<Request<E>> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => return page.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => page.list.decline_delete(),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => page.list.toggle_confirm_choice(),
        KeyCode::Enter => {
            let yes = page.list.pending_delete.as_ref().is_some_and(|(_, yes)| *yes);
            if yes {
                return page.confirm_delete();
            }
            page.list.decline_delete();
        }
        _ => {}
    }
    None
}
