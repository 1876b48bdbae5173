use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::interaction::Zone;
use crate::note::Note;

use super::surface::{self, MARKER_WIDTH, NoteArea};
use super::{overlays, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let surface = model.surface();

    render_header(model, frame, Rect::new(area.x, area.y, area.width, 1));
    frame.render_widget(Block::default().style(style::surface_style()), surface);

    for note in &model.registry {
        render_note(model, note, frame, surface);
    }

    if area.height > 1 {
        let bar = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        if model.active_toast().is_some() {
            status::render_toast_bar(model, frame, bar);
        } else {
            status::render_status_bar(model, frame, bar);
        }
    }

    if let Some(form) = &model.form {
        overlays::render_form_overlay(form, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_header(model: &Model, frame: &mut Frame, area: Rect) {
    let hint = if model.form_open() {
        "Enter save · Esc cancel"
    } else {
        "n new · ? help · q quit"
    };
    let header = Paragraph::new(format!(" Sticky Notes  {hint}")).style(style::header_style());
    frame.render_widget(header, area);
}

fn render_note(model: &Model, note: &Note, frame: &mut Frame, surface: Rect) {
    let Some(note_box) = model.note_box(&note.id) else {
        return;
    };
    let Some(area) = surface::note_area(model.metrics, note_box, surface) else {
        return;
    };

    let dragging = model.controller.live_box(&note.id).is_some();
    let zone = if dragging {
        model.controller.session().map(|session| session.zone())
    } else {
        model.controller.armed_zone(&note.id)
    };
    let markers = surface::markers(&area);

    let title_width = if markers.is_some() {
        area.rect.width.saturating_sub(2 * MARKER_WIDTH + 4)
    } else {
        area.rect.width.saturating_sub(2)
    };
    let block = Block::default()
        .borders(area.borders)
        .border_style(style::note_border_style(note.theme, zone.is_some(), dragging))
        .title(Span::styled(
            truncate_to_width(&note.title, usize::from(title_width)),
            style::note_title_style(note.theme),
        ))
        .style(style::note_style(note.theme));
    let body = Paragraph::new(note.content.as_str())
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(Clear, area.rect);
    frame.render_widget(body, area.rect);

    if let Some(zone) = zone.filter(|zone| zone.is_resize()) {
        render_zone_edge(frame, &area, zone, style::zone_edge_style(note.theme));
    }

    if let Some(markers) = markers {
        let armed = !dragging && zone == Some(Zone::Move);
        let marker_style = style::marker_style(note.theme, armed);
        frame.render_widget(Paragraph::new("[e]").style(marker_style), markers.edit);
        frame.render_widget(Paragraph::new("[x]").style(marker_style), markers.delete);
    }
}

/// Repaint one border side in the highlight style.
fn render_zone_edge(frame: &mut Frame, area: &NoteArea, zone: Zone, edge_style: Style) {
    let rect = area.rect;
    let edge = match zone {
        Zone::ResizeLeft if area.borders.contains(Borders::LEFT) => {
            Rect::new(rect.x, rect.y, 1, rect.height)
        }
        Zone::ResizeRight if area.borders.contains(Borders::RIGHT) => {
            Rect::new(rect.x + rect.width - 1, rect.y, 1, rect.height)
        }
        Zone::ResizeTop if area.borders.contains(Borders::TOP) => {
            Rect::new(rect.x, rect.y, rect.width, 1)
        }
        Zone::ResizeBottom if area.borders.contains(Borders::BOTTOM) => {
            Rect::new(rect.x, rect.y + rect.height - 1, rect.width, 1)
        }
        _ => return,
    };
    frame.buffer_mut().set_style(edge, edge_style);
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
