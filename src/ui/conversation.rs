use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use ds_base::config::{UI, theme};
use ds_base::state::{ChatRole, Message};

use super::{helpers::wrap_text, spinner};
use crate::state::State;

pub fn render_conversation(frame: &mut Frame, state: &mut State, area: Rect) {
    let base_style = Style::default().bg(theme::bg_surface());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::border()))
        .style(base_style)
        .title(Span::styled(
            format!(" {} ", state.mode.label()),
            Style::default().fg(theme::accent()).bold(),
        ));

    let content_area = block.inner(area);
    frame.render_widget(block, area);

    let text = build_lines(state, content_area.width.saturating_sub(2) as usize);

    // scroll_offset counts lines up from the bottom
    let viewport_height = content_area.height as usize;
    let max_scroll = text.len().saturating_sub(viewport_height).min(u16::MAX as usize) as u16;
    state.scroll_offset = state.scroll_offset.min(max_scroll);
    let top = max_scroll - state.scroll_offset;

    let paragraph = Paragraph::new(text).style(base_style).scroll((top, 0));
    frame.render_widget(paragraph, content_area.inner(Margin { horizontal: 1, vertical: 0 }));

    if max_scroll > 0 {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(theme::bg_elevated()))
            .thumb_style(Style::default().fg(theme::accent_dim()));
        let mut scrollbar_state = ScrollbarState::new(max_scroll as usize).position(top as usize);
        let track = area.inner(Margin { horizontal: 0, vertical: 1 });
        frame.render_stateful_widget(scrollbar, track, &mut scrollbar_state);
    }
}

/// Lay out history, the pending reply and the loading indicator as
/// pre-wrapped lines of at most `width` cells.
pub fn build_lines(state: &State, width: usize) -> Vec<Line<'static>> {
    let conv = &state.conversation;
    let mut text: Vec<Line<'static>> = Vec::new();

    if conv.history.is_empty() && conv.pending.is_none() && !conv.loading {
        for line in wrap_text(&UI.strings.greeting, width) {
            text.push(Line::from(Span::styled(line, Style::default().fg(theme::text_muted()).italic())));
        }
        return text;
    }

    for msg in &conv.history {
        push_message(&mut text, msg, width, None);
        text.push(Line::from(""));
    }

    if let Some(pending) = &conv.pending {
        let cursor = (!conv.paused).then_some(UI.icons.cursor.as_str());
        push_message(&mut text, pending, width, cursor);
        text.push(Line::from(""));
    }

    if conv.loading {
        text.push(Line::from(vec![
            Span::styled(format!("{} ", UI.icons.model), Style::default().fg(theme::model())),
            Span::styled(format!("{} ", spinner(state.spinner_frame)), Style::default().fg(theme::accent())),
            Span::styled(UI.strings.thinking.clone(), Style::default().fg(theme::text_muted()).italic()),
        ]));
    }

    text
}

fn push_message(text: &mut Vec<Line<'static>>, msg: &Message, width: usize, cursor: Option<&str>) {
    let (icon, color) = match msg.role {
        ChatRole::User => (UI.icons.user.as_str(), theme::user()),
        _ if msg.is_error => (UI.icons.error.as_str(), theme::error()),
        _ => (UI.icons.model.as_str(), theme::model()),
    };
    let body_color = if msg.is_error { theme::error() } else { theme::text() };

    // Fixed-width padded ID (4 chars)
    let prefix = format!("{} {:<4} ", icon, msg.id);
    let prefix_width = prefix.chars().count();
    let wrap_width = width.saturating_sub(prefix_width).max(1);
    let indent = " ".repeat(prefix_width);

    let mut body: Vec<String> = Vec::new();
    for paragraph in msg.content.split('\n') {
        if paragraph.trim().is_empty() {
            body.push(String::new());
        } else {
            body.extend(wrap_text(paragraph, wrap_width));
        }
    }

    let last = body.len() - 1;
    for (i, line) in body.into_iter().enumerate() {
        let lead = if i == 0 {
            Span::styled(prefix.clone(), Style::default().fg(color).bold())
        } else {
            Span::raw(indent.clone())
        };
        let mut spans = vec![lead, Span::styled(line, Style::default().fg(body_color))];
        if i == last
            && let Some(cursor) = cursor
        {
            spans.push(Span::styled(cursor.to_string(), Style::default().fg(theme::accent())));
        }
        text.push(Line::from(spans));
    }

    if msg.has_sources()
        && let Some(sources) = &msg.sources
    {
        text.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(UI.strings.sources_heading.clone(), Style::default().fg(theme::text_muted()).bold()),
        ]));
        for (n, source) in sources.iter().enumerate() {
            let marker = format!("{}. ", n + 1);
            let title_width = wrap_width.saturating_sub(marker.chars().count()).max(1);
            for (j, title) in wrap_text(&source.title, title_width).into_iter().enumerate() {
                let lead = if j == 0 { marker.clone() } else { " ".repeat(marker.chars().count()) };
                text.push(Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(lead, Style::default().fg(theme::text_muted())),
                    Span::styled(title, Style::default().fg(theme::link()).underlined()),
                ]));
            }
            if source.uri != source.title {
                text.push(Line::from(vec![
                    Span::raw(format!("{}{}", indent, " ".repeat(marker.chars().count()))),
                    Span::styled(
                        super::helpers::truncate_string(&source.uri, title_width),
                        Style::default().fg(theme::text_muted()),
                    ),
                ]));
            }
        }
    }
}
