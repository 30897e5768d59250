//! Conversation types.
//!
//! - `message`: ChatRole, Source, Message
//! - `conversation`: ConversationState (history, pending reply, loading/paused flags)

pub mod conversation;
pub mod message;

pub use conversation::ConversationState;
pub use message::{ChatRole, Message, Source, now_ms};
