use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let count = model.registry.len();
    let notes = if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    };

    let activity = match (model.controller.session(), model.cursor_hint()) {
        (Some(session), Some(cursor)) => {
            let action = if session.zone().is_resize() {
                "resizing"
            } else {
                "moving"
            };
            format!("  {} {action} ({})", cursor.glyph(), cursor.css_name())
        }
        (None, Some(cursor)) => format!("  {} {}", cursor.glyph(), cursor.css_name()),
        _ => String::new(),
    };
    let motion = if model.motion_tracking {
        ""
    } else {
        "  [no motion]"
    };

    let status = format!(" {notes}{activity}{motion}  ?:help");
    frame.render_widget(Paragraph::new(status).style(style::status_style()), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => ("[info]", style::status_style()),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
