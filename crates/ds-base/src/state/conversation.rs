use crate::llm_types::{PriorTurn, TurnRole};

use super::message::{ChatRole, Message};

/// Committed history plus the single in-flight reply.
///
/// `pending` is only set while a reveal runs and `loading` only while a
/// request is outstanding; while either holds, submissions are refused.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Append-only committed messages
    pub history: Vec<Message>,
    /// Model message currently being revealed (never part of `history`)
    pub pending: Option<Message>,
    pub loading: bool,
    pub paused: bool,
    next_user_id: usize,
    next_model_id: usize,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a request or a reveal is active.
    pub fn is_busy(&self) -> bool {
        self.loading || self.pending.is_some()
    }

    pub fn next_user_id(&mut self) -> String {
        self.next_user_id += 1;
        format!("U{}", self.next_user_id)
    }

    pub fn next_model_id(&mut self) -> String {
        self.next_model_id += 1;
        format!("A{}", self.next_model_id)
    }

    /// Committed messages mapped to gateway turns.
    /// System messages and local error placeholders are not part of the dialogue.
    pub fn prior_turns(&self) -> Vec<PriorTurn> {
        self.history
            .iter()
            .filter(|m| !m.is_error)
            .filter_map(|m| {
                let role = match m.role {
                    ChatRole::User => TurnRole::User,
                    ChatRole::Model => TurnRole::Model,
                    ChatRole::System => return None,
                };
                Some(PriorTurn { role, text: m.content.clone() })
            })
            .collect()
    }
}
