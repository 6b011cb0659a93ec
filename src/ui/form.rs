use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::Theme;
use crate::app::fields::{Editable, FieldKind, FieldValue, FormMode};
use crate::app::form::{FormFocus, FormView};

/// Render the draft editor: one line per field, then the buttons, then the error if any.
pub fn render_form<E: Editable>(f: &mut Frame, area: Rect, form: &FormView<E>, theme: &Theme, focused: bool) {
    let mode = form.mode();
    let active = Style::default().fg(theme.highlight_fg).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.title);
    let value_style = Style::default().fg(theme.text);

    let mut lines: Vec<Line> = Vec::new();
    for (i, (spec, value)) in E::FIELDS.iter().zip(&form.values).enumerate() {
        let is_focused = focused && form.focus == FormFocus::Field(i);
        let marker = if is_focused { "▶ " } else { "  " };
        let mut label = spec.label.to_string();
        if let Some(hint) = spec.hint(mode) {
            label.push(' ');
            label.push_str(hint);
        }
        if spec.is_required(mode) {
            label.push_str(" *");
        }
        let shown = match (spec.kind, value) {
            (FieldKind::Toggle, v) => format!("[{}]", if v.as_flag() { "x" } else { " " }),
            (FieldKind::Secret, FieldValue::Text(s)) => "*".repeat(s.chars().count()),
            (_, v) => v.as_text().to_string(),
        };
        let cursor = if is_focused && spec.kind != FieldKind::Toggle { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker, active),
            Span::styled(format!("{label}: "), label_style),
            Span::styled(format!("{shown}{cursor}"), if is_focused { active } else { value_style }),
        ]));
    }

    lines.push(Line::raw(""));
    let button = |text: String, on: bool| {
        let style = if focused && on {
            active.add_modifier(Modifier::REVERSED)
        } else {
            value_style
        };
        Span::styled(format!("[ {text} ]"), style)
    };
    let mut buttons = vec![Span::raw("  "), button(form.submit_label(), form.focus == FormFocus::Submit)];
    if mode == FormMode::Edit {
        buttons.push(Span::raw("  "));
        buttons.push(button("Cancel".to_string(), form.focus == FormFocus::Cancel));
    }
    lines.push(Line::from(buttons));

    if let Some(err) = &form.error {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(format!("  {err}"), Style::default().fg(theme.error_fg))));
    }

    let border = if focused { theme.highlight_fg } else { theme.border };
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}
