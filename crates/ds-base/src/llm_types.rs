//! Chat modes and the request shapes exchanged with the model gateway.
//!
//! Contains the mode → profile table and the provider-neutral request/reply
//! types. Does NOT include client implementations.

use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::config::{PROMPTS, UI};
use crate::state::Source;

/// Request profile selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Standard,
    Thinking,
    Search,
}

/// What a mode adds on top of the base system instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTraits {
    pub extended_reasoning: bool,
    pub web_search: bool,
}

impl ChatMode {
    /// Display order in the mode bar
    pub const ALL: [ChatMode; 3] = [ChatMode::Standard, ChatMode::Thinking, ChatMode::Search];

    pub fn label(&self) -> &'static str {
        match self {
            ChatMode::Standard => &UI.modes.standard,
            ChatMode::Thinking => &UI.modes.thinking,
            ChatMode::Search => &UI.modes.search,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ChatMode::Standard => ChatMode::Thinking,
            ChatMode::Thinking => ChatMode::Search,
            ChatMode::Search => ChatMode::Standard,
        }
    }

    pub fn traits(&self) -> ModeTraits {
        match self {
            ChatMode::Standard => ModeTraits { extended_reasoning: false, web_search: false },
            ChatMode::Thinking => ModeTraits { extended_reasoning: true, web_search: false },
            ChatMode::Search => ModeTraits { extended_reasoning: false, web_search: true },
        }
    }
}

/// Fully resolved request parameters for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeProfile {
    pub model: String,
    pub system_instruction: String,
    pub thinking_budget: Option<u32>,
    pub web_search: bool,
}

impl ModeProfile {
    pub fn resolve(mode: ChatMode, settings: &Settings) -> Self {
        let traits = mode.traits();
        Self {
            model: settings.models.for_mode(mode).to_string(),
            system_instruction: PROMPTS.system_instruction.trim_end().to_string(),
            thinking_budget: traits.extended_reasoning.then_some(settings.thinking_budget),
            web_search: traits.web_search,
        }
    }
}

/// The two roles the gateway understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

/// One earlier exchange sent along with a new prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Complete reply from the gateway
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GatewayReply {
    pub text: String,
    /// Grounding sources of the first candidate; `None` when there are none
    pub sources: Option<Vec<Source>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_modes() {
        let mut mode = ChatMode::Standard;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, ChatMode::ALL.to_vec());
        assert_eq!(mode, ChatMode::Standard);
    }

    #[test]
    fn standard_profile_is_base_only() {
        let profile = ModeProfile::resolve(ChatMode::Standard, &Settings::default());
        assert_eq!(profile.thinking_budget, None);
        assert!(!profile.web_search);
        assert_eq!(profile.system_instruction, PROMPTS.system_instruction.trim_end());
    }

    #[test]
    fn thinking_profile_carries_budget() {
        let settings = Settings { thinking_budget: 1024, ..Settings::default() };
        let profile = ModeProfile::resolve(ChatMode::Thinking, &settings);
        assert_eq!(profile.thinking_budget, Some(1024));
        assert!(!profile.web_search);
        assert_eq!(profile.model, settings.models.thinking);
    }

    #[test]
    fn search_profile_enables_web_search() {
        let profile = ModeProfile::resolve(ChatMode::Search, &Settings::default());
        assert_eq!(profile.thinking_budget, None);
        assert!(profile.web_search);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_yaml::to_string(&ChatMode::Thinking).unwrap().trim(), "thinking");
    }
}
