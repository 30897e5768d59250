use ds_base::config::UI;
use ds_base::llm_types::GatewayReply;
use ds_base::reveal::JobToken;
use ds_base::state::Message;

use crate::llms::LlmError;
use crate::state::State;

use super::ActionResult;

/// Handle GatewayReplied action: create the pending message or commit the fallback
pub fn handle_gateway_reply(
    state: &mut State,
    request_id: u64,
    result: Result<GatewayReply, LlmError>,
) -> ActionResult {
    if state.in_flight != Some(request_id) {
        tracing::warn!(request_id, in_flight = ?state.in_flight, "discarding stale gateway reply");
        return ActionResult::Nothing;
    }
    state.in_flight = None;

    let conv = &mut state.conversation;
    conv.loading = false;

    match result {
        Ok(reply) => {
            let id = conv.next_model_id();
            conv.pending = Some(Message::new_model(id, reply.sources));
            conv.paused = false;
            ActionResult::StartReveal { text: reply.text }
        }
        Err(e) => {
            tracing::warn!(request_id, error = %e, "request failed, committing fallback message");
            let id = conv.next_model_id();
            conv.history.push(Message::new_error(id, UI.strings.fallback_error.clone()));
            ActionResult::Nothing
        }
    }
}

fn is_active_reveal(state: &State, token: JobToken) -> bool {
    if state.reveal_token == Some(token) {
        return true;
    }
    tracing::debug!(?token, active = ?state.reveal_token, "ignoring event from inactive reveal");
    false
}

/// Handle RevealUpdate action: replace the pending content, never history
pub fn handle_reveal_update(state: &mut State, token: JobToken, partial: &str) -> ActionResult {
    if !is_active_reveal(state, token) {
        return ActionResult::Nothing;
    }
    if let Some(pending) = state.conversation.pending.as_mut() {
        pending.content.clear();
        pending.content.push_str(partial);
    }
    ActionResult::Nothing
}

/// Handle RevealComplete action: commit the pending message with the final text
pub fn handle_reveal_complete(state: &mut State, token: JobToken, content: String) -> ActionResult {
    if !is_active_reveal(state, token) {
        return ActionResult::Nothing;
    }
    state.reveal_token = None;

    let conv = &mut state.conversation;
    if let Some(mut msg) = conv.pending.take() {
        msg.content = content;
        tracing::info!(id = %msg.id, chars = msg.content.chars().count(), "reply committed");
        conv.history.push(msg);
    }
    conv.paused = false;
    ActionResult::Nothing
}

/// Handle TogglePause action: only meaningful while a reply is being revealed
pub fn handle_toggle_pause(state: &mut State) -> ActionResult {
    if state.conversation.pending.is_none() {
        return ActionResult::Nothing;
    }
    state.conversation.paused = !state.conversation.paused;
    ActionResult::TogglePause
}

/// Handle StopReveal action: commit what has been revealed so far
pub fn handle_stop_reveal(state: &mut State) -> ActionResult {
    let Some(msg) = state.conversation.pending.take() else {
        return ActionResult::Nothing;
    };
    state.reveal_token = None;
    state.conversation.paused = false;

    if msg.content.is_empty() {
        tracing::info!(id = %msg.id, "reveal stopped before any text was shown");
    } else {
        tracing::info!(id = %msg.id, chars = msg.content.chars().count(), "reveal stopped, keeping partial reply");
        state.conversation.history.push(msg);
    }
    ActionResult::CancelReveal
}
