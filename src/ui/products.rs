use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::api::Product;
use crate::app::Theme;
use crate::app::list::ListView;
use crate::ui::components::{page_start, render_list_placeholder};

pub fn render_products_table(f: &mut Frame, area: Rect, list: &ListView<Product>, theme: &Theme, focused: bool) {
    let border = if focused { theme.highlight_fg } else { theme.border };
    let block = Block::default()
        .title("Products")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if render_list_placeholder(f, area, list, theme, block.clone()) {
        return;
    }

    let visible = area.height.saturating_sub(3) as usize;
    let items = list.items();
    let start = page_start(list.selected, visible);
    let end = (start + visible.max(1)).min(items.len());

    let rows = items[start..end].iter().enumerate().map(|(i, p)| {
        let style = if start + i == list.selected {
            Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Row::new(vec![
            Cell::from(p.name.clone()),
            Cell::from(format!("${:.2}", p.price)),
            Cell::from(p.category.clone()),
            Cell::from(if p.in_stock { "In Stock" } else { "Out of Stock" }),
            Cell::from(p.tags.join(" ")),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Length(11),
        Constraint::Percentage(20),
        Constraint::Length(12),
        Constraint::Percentage(30),
    ];
    let header = Row::new(vec!["NAME", "PRICE", "CATEGORY", "STOCK", "TAGS"])
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_product_details(f: &mut Frame, area: Rect, list: &ListView<Product>, theme: &Theme) {
    let text = match list.selected_item() {
        Some(p) => format!(
            "{}\n{}\n\n${:.2}  {}  {}\nTags: {}",
            p.name,
            p.description,
            p.price,
            p.category,
            if p.in_stock { "In Stock" } else { "Out of Stock" },
            if p.tags.is_empty() { "-".to_string() } else { p.tags.join(", ") },
        ),
        None => String::new(),
    };
    let p = Paragraph::new(text).style(Style::default().fg(theme.text)).wrap(Wrap { trim: false }).block(
        Block::default().title("Details").borders(Borders::ALL).border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(p, area);
}
