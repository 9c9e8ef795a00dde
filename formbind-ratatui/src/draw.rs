//! Rendering of a [`ModalForm`] as a centered terminal dialog.

use formbind::{FieldKind, FieldView, ModalForm};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::backend::Theme;
use crate::view::{Focus, ModalView};

/// Width of the dialog, clamped to the frame.
const MODAL_WIDTH: u16 = 64;

/// Draw the modal on top of whatever the frame already shows.
pub fn draw_modal(frame: &mut Frame, form: &ModalForm, view: &ModalView, theme: &Theme) {
    let views = form.views();
    let fields_height: u16 = views.iter().map(field_height).sum();
    let banner_height = u16::from(form.banner().is_some());

    // borders, banner, fields, buttons, help
    let wanted = 2 + banner_height + fields_height + 3 + 1;
    let area = centered(frame.area(), MODAL_WIDTH, wanted);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .title(format!(" {} ", form.config().title()))
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Banner
            Constraint::Min(0),                // Fields
            Constraint::Length(3),             // Buttons
            Constraint::Length(1),             // Help bar
        ])
        .split(inner);

    if let Some(message) = form.banner() {
        let banner = Paragraph::new(format!("⚠ {message}"))
            .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD));
        frame.render_widget(banner, chunks[0]);
    }

    let mut y = chunks[1].y;
    let bottom = chunks[1].y + chunks[1].height;
    for (idx, field) in views.iter().enumerate() {
        let height = field_height(field);
        if y >= bottom {
            break;
        }
        let field_area = Rect {
            x: chunks[1].x,
            y,
            width: chunks[1].width,
            height: height.min(bottom - y),
        };
        draw_field(frame, field, field_area, view.focus() == Focus::Field(idx), theme);
        y += height;
    }

    draw_buttons(frame, form, view, chunks[2], theme);

    let help = Paragraph::new(help_line(form.config().submit_label()))
        .style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[3]);
}

fn help_line(submit_label: &str) -> String {
    format!("Tab/↑/↓: Navigate  ←/→/Space: Choose  F10: {submit_label}  Esc: Cancel")
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

fn field_height(field: &FieldView<'_>) -> u16 {
    match field.kind() {
        FieldKind::Text if field.hints().multiline => 4,
        FieldKind::Radio(options) => 2 + options.len() as u16,
        _ => 3,
    }
}

fn draw_field(frame: &mut Frame, field: &FieldView<'_>, area: Rect, is_focused: bool, theme: &Theme) {
    let border_color = if field.error().is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };
    let text_color = if field.is_disabled() {
        theme.border
    } else {
        theme.text
    };

    let label = if field.is_required() {
        format!(" {} * ", field.label())
    } else {
        format!(" {} ", field.label())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(label)
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            text_color
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match field.kind() {
        FieldKind::Text => {
            let value = field.value().to_text();
            let shown = if field.hints().masked {
                "●".repeat(value.chars().count())
            } else {
                value.clone()
            };

            let paragraph = match (&field.hints().placeholder, value.is_empty()) {
                (Some(placeholder), true) => {
                    Paragraph::new(placeholder.clone()).style(Style::default().fg(theme.border))
                }
                _ => Paragraph::new(shown).style(Style::default().fg(text_color)),
            };
            frame.render_widget(paragraph, inner);

            if is_focused {
                let last_line = value.rsplit('\n').next().unwrap_or_default();
                let line = value.matches('\n').count() as u16;
                let cursor_x = inner.x + last_line.chars().count() as u16;
                let cursor_y = inner.y + line;
                if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
                    frame.set_cursor_position((cursor_x, cursor_y));
                }
            }
        }
        FieldKind::Checkbox => {
            let checked = field.value().as_bool().unwrap_or(false);
            let checkbox = if checked { "[✓]" } else { "[ ]" };
            let text = Paragraph::new(format!("{checkbox} Yes"))
                .style(Style::default().fg(if checked { theme.success } else { text_color }));
            frame.render_widget(text, inner);
        }
        FieldKind::Select(options) => {
            let shown = field
                .value()
                .as_str()
                .and_then(|key| options.label(key))
                .unwrap_or("-- choose --");
            let style = if is_focused {
                Style::default()
                    .fg(theme.text)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(text_color)
            };
            frame.render_widget(Paragraph::new(format!("◀ {shown} ▶")).style(style), inner);
        }
        FieldKind::Radio(options) => {
            let selected = field.value().as_str();
            for (row, (key, label)) in options.iter().enumerate() {
                let row = row as u16;
                if row >= inner.height {
                    break;
                }
                let is_selected = selected == Some(key);
                let marker = if is_selected { "(●)" } else { "( )" };
                let style = if is_selected {
                    Style::default().fg(theme.highlight)
                } else {
                    Style::default().fg(text_color)
                };
                let line_area = Rect {
                    y: inner.y + row,
                    height: 1,
                    ..inner
                };
                frame.render_widget(Paragraph::new(format!("{marker} {label}")).style(style), line_area);
            }
        }
    }

    if let Some(error) = field.error() {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

fn draw_buttons(frame: &mut Frame, form: &ModalForm, view: &ModalView, area: Rect, theme: &Theme) {
    let config = form.config();
    let columns = if config.cancel_label().is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let label = if form.is_submitting() {
        format!("{}…", config.submit_label())
    } else {
        config.submit_label().to_string()
    };
    draw_button(
        frame,
        &label,
        view.focus() == Focus::Submit,
        form.submit_enabled(),
        columns[0],
        theme,
    );

    if let Some(cancel) = config.cancel_label() {
        draw_button(frame, cancel, view.focus() == Focus::Cancel, true, columns[1], theme);
    }
}

fn draw_button(frame: &mut Frame, label: &str, focused: bool, enabled: bool, area: Rect, theme: &Theme) {
    let style = match (enabled, focused) {
        (false, _) => Style::default().fg(theme.border).add_modifier(Modifier::DIM),
        (true, true) => Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    };
    let text = if focused {
        format!("[ {label} ]")
    } else {
        label.to_string()
    };

    let button = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused { theme.primary } else { theme.border })),
        );
    frame.render_widget(button, area);
}
