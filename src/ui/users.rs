use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::api::User;
use crate::app::Theme;
use crate::app::list::ListView;
use crate::ui::components::{page_start, render_list_placeholder};

pub fn render_users_table(f: &mut Frame, area: Rect, list: &ListView<User>, theme: &Theme, focused: bool) {
    let border = if focused { theme.highlight_fg } else { theme.border };
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if render_list_placeholder(f, area, list, theme, block.clone()) {
        return;
    }

    let visible = area.height.saturating_sub(3) as usize;
    let items = list.items();
    let start = page_start(list.selected, visible);
    let end = (start + visible.max(1)).min(items.len());

    let rows = items[start..end].iter().enumerate().map(|(i, u)| {
        let style = if start + i == list.selected {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.created_date()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
        Constraint::Length(12),
    ];
    let header = Row::new(vec!["ID", "NAME", "EMAIL", "CREATED AT"])
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, list: &ListView<User>, theme: &Theme) {
    let text = match list.selected_item() {
        Some(u) => format!("ID: {}\nName: {}\nEmail: {}\nCreated: {}", u.id, u.name, u.email, u.created_date()),
        None => String::new(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(theme.text)).block(
        Block::default().title("Details").borders(Borders::ALL).border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(p, area);
}
