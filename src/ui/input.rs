use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use ds_base::config::{UI, theme};
use ds_base::llm_types::ChatMode;

use super::helpers::truncate_string;
use crate::state::State;

pub fn render_input(frame: &mut Frame, state: &State, area: Rect) {
    let enabled = state.input_enabled();
    let border_color = if enabled { theme::accent() } else { theme::border() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::bg_elevated()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as usize;
    let line = if state.input.is_empty() {
        Line::from(Span::styled(
            format!(" {}", UI.strings.input_placeholder),
            Style::default().fg(theme::text_muted()).italic(),
        ))
    } else {
        // Keep the tail visible while typing past the edge
        let visible = tail_within(&state.input, width);
        Line::from(vec![Span::raw(" "), Span::styled(visible, Style::default().fg(theme::text()))])
    };
    frame.render_widget(Paragraph::new(line), inner);

    if enabled {
        let typed = if state.input.is_empty() { 0 } else { tail_within(&state.input, width).width() };
        let x = inner.x + 1 + typed.min(inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position((x, inner.y));
    }
}

/// Mode badges on the left, help on the right.
pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::bg_base()).fg(theme::text_muted());
    let mut spans = vec![Span::styled(" ", base_style)];

    for (i, mode) in ChatMode::ALL.iter().enumerate() {
        let label = format!(" F{} {} ", i + 1, mode.label());
        let style = if *mode == state.mode {
            Style::default().fg(theme::bg_base()).bg(theme::accent()).bold()
        } else {
            Style::default().fg(theme::text()).bg(theme::bg_elevated())
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", base_style));
    }

    if state.conversation.pending.is_some() {
        let hint = if state.conversation.paused { &UI.strings.resume } else { &UI.strings.pause };
        spans.push(Span::styled(
            format!(" Ctrl+P {} ", hint),
            Style::default().fg(theme::bg_base()).bg(theme::accent_dim()).bold(),
        ));
        spans.push(Span::styled(" ", base_style));
    }

    let left_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let room = (area.width as usize).saturating_sub(left_width + 1);
    let help = truncate_string(&UI.strings.help, room);
    let padding = room.saturating_sub(help.width());

    spans.push(Span::styled(" ".repeat(padding), base_style));
    spans.push(Span::styled(help, base_style));
    spans.push(Span::styled(" ", base_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Longest suffix of `s` that fits in `width` cells.
fn tail_within(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut taken = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if taken + cw > width {
            break;
        }
        taken += cw;
        start = idx;
    }
    s[start..].to_string()
}
