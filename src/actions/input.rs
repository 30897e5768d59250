use ds_base::llm_types::ModeProfile;
use ds_base::state::Message;

use crate::llms::LlmRequest;
use crate::state::State;

use super::ActionResult;

/// Typing is ignored while the input is disabled.
pub fn handle_input_char(state: &mut State, c: char) -> ActionResult {
    if state.input_enabled() && !c.is_control() {
        state.input.push(c);
    }
    ActionResult::Nothing
}

pub fn handle_input_backspace(state: &mut State) -> ActionResult {
    if state.input_enabled() {
        state.input.pop();
    }
    ActionResult::Nothing
}

/// Handle InputSubmit action: the input is consumed only when accepted
pub fn handle_input_submit(state: &mut State) -> ActionResult {
    if state.input.trim().is_empty() || !state.input_enabled() {
        return ActionResult::Nothing;
    }
    let text = std::mem::take(&mut state.input);
    submit(state, &text)
}

/// Start one request/response/reveal cycle for `text`.
///
/// Blank text and submissions while a request or reveal is active are
/// silently ignored.
pub fn submit(state: &mut State, text: &str) -> ActionResult {
    if text.trim().is_empty() || state.conversation.is_busy() {
        return ActionResult::Nothing;
    }

    let conv = &mut state.conversation;
    // Turns before the new prompt; the prompt itself travels separately.
    let prior_turns = conv.prior_turns();
    let id = conv.next_user_id();
    conv.history.push(Message::new_user(id, text.to_string()));
    conv.loading = true;
    conv.pending = None;
    conv.paused = false;

    state.reveal_token = None;
    state.scroll_offset = 0;
    let request_id = state.next_request_id();
    state.in_flight = Some(request_id);

    let profile = ModeProfile::resolve(state.mode, &state.settings);
    tracing::info!(
        request_id,
        mode = ?state.mode,
        model = %profile.model,
        turns = prior_turns.len(),
        "submitting prompt"
    );

    ActionResult::StartQuery { request_id, request: LlmRequest { prompt: text.to_string(), prior_turns, profile } }
}

#[cfg(test)]
mod tests {
    use ds_base::llm_types::{ChatMode, PriorTurn, TurnRole};
    use ds_base::state::ChatRole;

    use super::*;
    use crate::actions::{Action, apply_action};

    #[test]
    fn blank_submissions_change_nothing() {
        for text in ["", "   ", "\n\t"] {
            let mut state = State::default();
            assert!(matches!(submit(&mut state, text), ActionResult::Nothing));
            assert!(state.conversation.history.is_empty());
            assert!(state.conversation.pending.is_none());
            assert!(!state.conversation.loading);
            assert!(state.in_flight.is_none());
        }
    }

    #[test]
    fn submit_appends_user_message_and_starts_query() {
        let mut state = State::default();
        state.mode = ChatMode::Thinking;

        let result = submit(&mut state, "mojito recipe");
        let ActionResult::StartQuery { request_id, request } = result else {
            panic!("expected StartQuery");
        };

        assert_eq!(state.in_flight, Some(request_id));
        assert!(state.conversation.loading);
        assert!(state.conversation.pending.is_none());
        assert_eq!(state.conversation.history.len(), 1);
        let msg = &state.conversation.history[0];
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "mojito recipe");
        assert_eq!(msg.id, "U1");

        assert_eq!(request.prompt, "mojito recipe");
        assert!(request.prior_turns.is_empty());
        assert!(request.profile.thinking_budget.is_some());
    }

    #[test]
    fn submit_while_loading_is_noop() {
        let mut state = State::default();
        submit(&mut state, "first");
        let history_len = state.conversation.history.len();
        let in_flight = state.in_flight;

        assert!(matches!(submit(&mut state, "second"), ActionResult::Nothing));
        assert_eq!(state.conversation.history.len(), history_len);
        assert_eq!(state.in_flight, in_flight);
    }

    #[test]
    fn submit_while_pending_is_noop() {
        let mut state = State::default();
        state.conversation.pending = Some(Message::new_model("A1".into(), None));
        assert!(matches!(submit(&mut state, "hello"), ActionResult::Nothing));
        assert!(state.conversation.history.is_empty());
        assert!(!state.conversation.loading);
    }

    #[test]
    fn prior_turns_exclude_new_prompt() {
        let mut state = State::default();
        state.conversation.history.push(Message::new_user("U1".into(), "hi".into()));
        state.conversation.history.push(Message::new_error("A1".into(), "failed".into()));

        let ActionResult::StartQuery { request, .. } = submit(&mut state, "again") else {
            panic!("expected StartQuery");
        };
        assert_eq!(request.prior_turns, vec![PriorTurn { role: TurnRole::User, text: "hi".into() }]);
        assert_eq!(request.prompt, "again");
    }

    #[test]
    fn input_submit_consumes_input_only_when_accepted() {
        let mut state = State::default();
        state.input = "   ".into();
        apply_action(&mut state, Action::InputSubmit);
        assert_eq!(state.input, "   ");

        state.input = "negroni".into();
        let result = apply_action(&mut state, Action::InputSubmit);
        assert!(matches!(result, ActionResult::StartQuery { .. }));
        assert!(state.input.is_empty());
    }

    #[test]
    fn typing_disabled_while_busy() {
        let mut state = State::default();
        apply_action(&mut state, Action::InputChar('a'));
        assert_eq!(state.input, "a");

        state.conversation.loading = true;
        apply_action(&mut state, Action::InputChar('b'));
        apply_action(&mut state, Action::InputBackspace);
        assert_eq!(state.input, "a");
    }

    #[test]
    fn backspace_removes_whole_char() {
        let mut state = State::default();
        for c in "caipirinha🍋".chars() {
            apply_action(&mut state, Action::InputChar(c));
        }
        apply_action(&mut state, Action::InputBackspace);
        assert_eq!(state.input, "caipirinha");
    }
}
