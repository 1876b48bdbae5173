use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::form::{FormField, NoteForm};
use crate::note::Theme;

use super::style;

const FORM_WIDTH: u16 = 56;
// border(2) + padding(2) + one row per field + blank + footer
const FORM_HEIGHT: u16 = 4 + 5 + 2;

pub fn form_popup_rect(area: Rect) -> Rect {
    centered_popup_rect(FORM_WIDTH, FORM_HEIGHT, area)
}

pub fn render_form_overlay(form: &NoteForm, frame: &mut Frame, area: Rect) {
    let popup = form_popup_rect(area);
    let label_style = Style::default().fg(Color::Indexed(250));
    let focus_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let invalid_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ORDER {
        let focused = form.focus == field;
        let marker = if focused { ">" } else { " " };
        let label = format!("{marker} {:<8}", field.label());
        let label_span = if form.is_flagged(field) {
            Span::styled(label, invalid_style)
        } else if focused {
            Span::styled(label, focus_style)
        } else {
            Span::styled(label, label_style)
        };

        let value_spans = if field == FormField::Theme {
            theme_spans(form.theme)
        } else {
            let mut value = form.value(field);
            if focused {
                value.push('_');
            }
            vec![Span::raw(value)]
        };

        let mut spans = vec![label_span, Span::raw(" ")];
        spans.extend(value_spans);
        if form.is_undersized(field) {
            spans.push(Span::styled("  min 100", invalid_style));
        } else if form.is_oversized(field) {
            spans.push(Span::styled("  too large", invalid_style));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Tab next · ←/→ theme · Enter save · Esc cancel",
        dim_style,
    ));

    let block = Block::default()
        .title(form.heading())
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn theme_spans(theme: Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled("   ", Style::default().bg(style::theme_background(theme))),
        Span::raw(format!(" ‹ {} ›", theme.name())),
    ]
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let display = |path: Option<&std::path::PathBuf>, fallback: &str| {
        path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
    };
    let global_cfg = display(model.config_global_path.as_ref(), "<unknown>");
    let local_cfg = display(model.config_local_path.as_ref(), "<none>");
    let store = display(model.store_path.as_ref(), "<memory>");

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Mouse", section_style));
    lines.push(Line::raw("  Drag inside a note   Move it"));
    lines.push(Line::raw("  Drag a note edge     Resize from that side"));
    lines.push(Line::raw("  Release on [x]       Delete the note"));
    lines.push(Line::raw("  Release on [e]       Edit the note"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Keys", section_style));
    lines.push(Line::raw("  n                   New note"));
    lines.push(Line::raw("  e                   Edit top note"));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Files", section_style));
    lines.push(Line::raw(format!("  Board: {store}")));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );
    let content_height = inner.height.saturating_sub(1);
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("Esc or ? closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
