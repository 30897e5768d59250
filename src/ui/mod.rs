mod conversation;
mod helpers;
mod input;

use ratatui::{prelude::*, widgets::Block};

use ds_base::config::{UI, theme};

use crate::state::State;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

pub fn render(frame: &mut Frame, state: &mut State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::bg_base())), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Conversation
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, main_layout[0]);
    conversation::render_conversation(frame, state, main_layout[1]);
    input::render_input(frame, state, main_layout[2]);
    input::render_status_bar(frame, state, main_layout[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(format!(" {}", UI.strings.title), Style::default().fg(theme::accent()).bold())),
        Line::from(Span::styled(format!(" {}", UI.strings.subtitle), Style::default().fg(theme::text_muted()))),
    ];
    frame.render_widget(ratatui::widgets::Paragraph::new(lines), area);
}
