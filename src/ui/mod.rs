//! Rendering. Layout: navigation header, form on the left, list and details
//! on the right, status bar at the bottom, delete confirmation on top.
//!
pub mod components;
pub mod form;
pub mod products;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::page::PaneFocus;
use crate::app::{ActivePage, AppState, Route};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(root[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(body[1]);

    let full = f.area();
    render_header(f, root[0], app);

    let theme = &app.theme;
    match &app.page {
        ActivePage::Products(page) => {
            form::render_form(f, body[0], &page.form, theme, page.focus == PaneFocus::Form);
            products::render_products_table(f, right[0], &page.list, theme, page.focus == PaneFocus::List);
            products::render_product_details(f, right[1], &page.list, theme);
            if let Some((p, yes)) = &page.list.pending_delete {
                components::render_confirm_modal(f, full, theme, "product", &p.name, *yes);
            }
        }
        ActivePage::Users(page) => {
            form::render_form(f, body[0], &page.form, theme, page.focus == PaneFocus::Form);
            users::render_users_table(f, right[0], &page.list, theme, page.focus == PaneFocus::List);
            users::render_user_details(f, right[1], &page.list, theme);
            if let Some((u, yes)) = &page.list.pending_delete {
                let label = format!("{} <{}>", u.name, u.email);
                components::render_confirm_modal(f, full, theme, "user", &label, *yes);
            }
        }
    }

    components::render_status_bar(f, root[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for route in [Route::Products, Route::Users] {
        let style = if route == app.route() {
            Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.header_fg)
        };
        spans.push(Span::styled(format!(" {} ", route.title()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(format!("  {}", app.api_url), Style::default().fg(theme.muted)));

    let p = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title("CRUD API Manager")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .style(Style::default().fg(theme.header_fg).bg(theme.header_bg));
    f.render_widget(p, area);
}
