//! Shared UI components (status bar, list placeholders, confirm modal).
//!
//! Small building blocks reused by the products and users screens.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::api::Entity;
use crate::app::keymap::KeyAction;
use crate::app::list::{ListState, ListView};
use crate::app::{AppState, InputMode, Theme};

/// Render the bottom status bar with mode and key hints.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let km = &app.keymap;
    let keys = |a: KeyAction| km.keys_for(a).join("/");
    let chorded_quit = km
        .keys_for(KeyAction::Quit)
        .into_iter()
        .filter(|k| k.starts_with("Ctrl+"))
        .collect::<Vec<_>>()
        .join("/");
    let (mode, hints) = match app.input_mode() {
        InputMode::Normal => (
            "LIST",
            format!(
                "{}: move  {}: edit  {}: delete  {}: form  {}: reload  {}: switch  {}: quit",
                keys(KeyAction::MoveDown),
                keys(KeyAction::EditSelection),
                keys(KeyAction::DeleteSelection),
                keys(KeyAction::FocusForm),
                keys(KeyAction::Reload),
                keys(KeyAction::SwitchTab),
                keys(KeyAction::Quit),
            ),
        ),
        InputMode::Form => (
            "FORM",
            format!(
                "Tab/Up/Down: field  Space: toggle  Enter: next/press  Ctrl+S: submit  Esc: cancel/back  {chorded_quit}: quit"
            ),
        ),
        InputMode::Confirm => (
            "CONFIRM",
            format!("y: yes  n/Esc: no  Left/Right: choose  Enter: apply  {chorded_quit}: quit"),
        ),
    };
    let msg = format!("mode: {mode}  {hints}");
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg));
    f.render_widget(p, area);
}

/// Placeholder text for a list that is not loaded, or loaded but empty.
pub fn list_placeholder<E: Entity>(list: &ListView<E>) -> Option<String> {
    match &list.state {
        ListState::Loading => Some(format!("Loading {}s...", E::NOUN)),
        ListState::Errored(msg) => Some(msg.clone()),
        ListState::Loaded(items) if items.is_empty() => {
            Some(format!("No {}s found. Create one to get started!", E::NOUN))
        }
        ListState::Loaded(_) => None,
    }
}

/// Render the placeholder for `list` inside `block`. Returns false when there are rows to draw instead.
pub fn render_list_placeholder<E: Entity>(
    f: &mut Frame,
    area: Rect,
    list: &ListView<E>,
    theme: &Theme,
    block: Block,
) -> bool {
    let Some(text) = list_placeholder(list) else {
        return false;
    };
    let color = if matches!(list.state, ListState::Errored(_)) { theme.error_fg } else { theme.muted };
    let p = Paragraph::new(text).style(Style::default().fg(color)).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
    true
}

/// First visible row so that `selected` stays on screen.
pub fn page_start(selected: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    (selected / visible) * visible
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Blocking "are you sure" prompt for a pending delete.
pub fn render_confirm_modal(f: &mut Frame, area: Rect, theme: &Theme, noun: &str, label: &str, yes: bool) {
    let rect = centered_rect(54, 7, area);
    let selected = Style::default().fg(theme.highlight_fg).add_modifier(Modifier::REVERSED);
    let plain = Style::default().fg(theme.text);
    let lines = vec![
        Line::from(format!("Are you sure you want to delete this {noun}?")),
        Line::from(Span::styled(label.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(" Yes ", if yes { selected } else { plain }),
            Span::raw("    "),
            Span::styled(" No ", if yes { plain } else { selected }),
        ]),
    ];
    let p = Paragraph::new(lines).block(
        Block::default()
            .title("Confirm delete")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
