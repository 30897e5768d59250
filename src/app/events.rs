use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use ds_base::constants::{SCROLL_ARROW_AMOUNT, SCROLL_PAGE_AMOUNT};
use ds_base::llm_types::ChatMode;

use crate::actions::Action;
use crate::state::State;

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return Some(Action::None);
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global Ctrl shortcuts (always handled first)
            if ctrl {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('q') => return None,
                    KeyCode::Char('p') => return Some(Action::TogglePause),
                    _ => return Some(Action::None),
                }
            }

            // Escape cuts the reveal short
            if key.code == KeyCode::Esc && state.conversation.pending.is_some() {
                return Some(Action::StopReveal);
            }

            let action = match key.code {
                KeyCode::Enter => Action::InputSubmit,
                KeyCode::Backspace => Action::InputBackspace,
                KeyCode::Char(c) => Action::InputChar(c),
                KeyCode::Tab => Action::CycleMode,
                KeyCode::F(1) => Action::SelectMode(ChatMode::Standard),
                KeyCode::F(2) => Action::SelectMode(ChatMode::Thinking),
                KeyCode::F(3) => Action::SelectMode(ChatMode::Search),
                KeyCode::Up => Action::ScrollUp(SCROLL_ARROW_AMOUNT),
                KeyCode::Down => Action::ScrollDown(SCROLL_ARROW_AMOUNT),
                KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
                KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
                _ => Action::None,
            };
            Some(action)
        }
        _ => Some(Action::None),
    }
}
