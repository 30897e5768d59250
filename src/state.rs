//! Runtime state: the conversation plus everything the terminal needs.

use ds_base::config::Settings;
use ds_base::llm_types::ChatMode;
use ds_base::reveal::JobToken;
use ds_base::state::ConversationState;

pub struct State {
    pub conversation: ConversationState,
    pub settings: Settings,
    pub mode: ChatMode,
    pub input: String,
    /// Request whose reply is awaited; replies for any other id are stale
    pub in_flight: Option<u64>,
    /// Reveal job feeding `conversation.pending`; events of other jobs are stale
    pub reveal_token: Option<JobToken>,
    pub(crate) last_request_id: u64,
    /// Lines scrolled up from the bottom of the conversation (0 = follow)
    pub scroll_offset: u16,
    pub spinner_frame: usize,
    pub dirty: bool,
}

impl State {
    pub fn new(settings: Settings) -> Self {
        let mode = settings.default_mode;
        Self {
            conversation: ConversationState::new(),
            settings,
            mode,
            input: String::new(),
            in_flight: None,
            reveal_token: None,
            last_request_id: 0,
            scroll_offset: 0,
            spinner_frame: 0,
            dirty: true,
        }
    }

    /// Input is accepted only when no request or reveal is running.
    pub fn input_enabled(&self) -> bool {
        !self.conversation.is_busy()
    }

    pub(crate) fn next_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
