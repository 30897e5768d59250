//! Action handling split into domain-focused modules.
//!
//! - `input`: input editing and submission
//! - `streaming`: gateway replies and reveal progress (update/complete/pause/stop)
//!
//! `apply_action` is the only place conversation state changes. It never
//! performs I/O or touches timers; side effects are requested through the
//! returned [`ActionResult`] and carried out by the app loop.

pub mod input;
pub mod streaming;

use ds_base::llm_types::{ChatMode, GatewayReply};
use ds_base::reveal::JobToken;

use crate::llms::{LlmError, LlmRequest};
use crate::state::State;

#[derive(Debug)]
pub enum Action {
    InputChar(char),
    InputBackspace,
    InputSubmit,
    SelectMode(ChatMode),
    CycleMode,
    TogglePause,
    /// Cut the active reveal short, keeping what was revealed
    StopReveal,
    GatewayReplied { request_id: u64, result: Result<GatewayReply, LlmError> },
    RevealUpdate { token: JobToken, partial: String },
    RevealComplete { token: JobToken, content: String },
    ScrollUp(u16),
    ScrollDown(u16),
    None,
}

#[derive(Debug)]
pub enum ActionResult {
    Nothing,
    /// Cancel any reveal, then dispatch `request` to the gateway
    StartQuery { request_id: u64, request: LlmRequest },
    /// Start revealing `text` into the pending message
    StartReveal { text: String },
    CancelReveal,
    TogglePause,
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::InputChar(c) => input::handle_input_char(state, c),
        Action::InputBackspace => input::handle_input_backspace(state),
        Action::InputSubmit => input::handle_input_submit(state),
        Action::SelectMode(mode) => {
            state.mode = mode;
            ActionResult::Nothing
        }
        Action::CycleMode => {
            state.mode = state.mode.next();
            ActionResult::Nothing
        }
        Action::TogglePause => streaming::handle_toggle_pause(state),
        Action::StopReveal => streaming::handle_stop_reveal(state),
        Action::GatewayReplied { request_id, result } => streaming::handle_gateway_reply(state, request_id, result),
        Action::RevealUpdate { token, partial } => streaming::handle_reveal_update(state, token, &partial),
        Action::RevealComplete { token, content } => streaming::handle_reveal_complete(state, token, content),
        Action::ScrollUp(amount) => {
            state.scroll_offset = state.scroll_offset.saturating_add(amount);
            ActionResult::Nothing
        }
        Action::ScrollDown(amount) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(amount);
            ActionResult::Nothing
        }
        Action::None => ActionResult::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_mode_wraps() {
        let mut state = State::default();
        for _ in 0..3 {
            apply_action(&mut state, Action::CycleMode);
        }
        assert_eq!(state.mode, ChatMode::Standard);
        apply_action(&mut state, Action::CycleMode);
        assert_eq!(state.mode, ChatMode::Thinking);
    }

    #[test]
    fn select_mode_allowed_while_busy() {
        let mut state = State::default();
        state.conversation.loading = true;
        apply_action(&mut state, Action::SelectMode(ChatMode::Search));
        assert_eq!(state.mode, ChatMode::Search);
    }

    #[test]
    fn scroll_saturates() {
        let mut state = State::default();
        apply_action(&mut state, Action::ScrollDown(5));
        assert_eq!(state.scroll_offset, 0);
        apply_action(&mut state, Action::ScrollUp(3));
        apply_action(&mut state, Action::ScrollUp(3));
        assert_eq!(state.scroll_offset, 6);
        apply_action(&mut state, Action::ScrollDown(4));
        assert_eq!(state.scroll_offset, 2);
    }
}
