pub mod events;
mod run;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use ds_base::reveal::{RevealEvent, RevealScheduler};

use crate::actions::{Action, ActionResult, apply_action};
use crate::llms::{GatewayEvent, LlmClient, start_query};
use crate::state::State;

/// Owns the conversation state plus the effects the reducer asks for: the
/// gateway worker channel and the reveal timer.
pub struct App {
    pub state: State,
    reveal: RevealScheduler,
    client: Arc<dyn LlmClient>,
    tx: Sender<GatewayEvent>,
    rx: Receiver<GatewayEvent>,
    /// Last render time for throttling
    last_render: Option<Instant>,
    /// Last spinner animation update time
    last_spinner: Instant,
}

impl App {
    pub fn new(state: State, client: Arc<dyn LlmClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        let reveal = RevealScheduler::new(state.settings.reveal_interval());
        Self { state, reveal, client, tx, rx, last_render: None, last_spinner: Instant::now() }
    }

    pub(crate) fn handle_action(&mut self, action: Action) {
        // Any action triggers a re-render
        self.state.dirty = true;
        match apply_action(&mut self.state, action) {
            ActionResult::StartQuery { request_id, request } => {
                if let Some(token) = self.reveal.cancel() {
                    tracing::debug!(?token, "cancelled reveal before new query");
                }
                start_query(self.client.clone(), request_id, request, self.tx.clone());
            }
            ActionResult::StartReveal { text } => {
                let token = self.reveal.start(text, Instant::now());
                self.state.reveal_token = Some(token);
            }
            ActionResult::CancelReveal => {
                self.reveal.cancel();
            }
            ActionResult::TogglePause => {
                let paused = self.reveal.toggle_pause(Instant::now());
                tracing::debug!(?paused, "reveal pause toggled");
            }
            ActionResult::Nothing => {}
        }
    }

    /// Feed finished gateway calls into the reducer.
    pub(crate) fn process_gateway_events(&mut self) {
        while let Ok(evt) = self.rx.try_recv() {
            self.handle_action(Action::GatewayReplied { request_id: evt.request_id, result: evt.result });
        }
    }

    /// Fire every reveal step due by `now`.
    pub(crate) fn process_reveal(&mut self, now: Instant) {
        for event in self.reveal.tick(now) {
            let action = match event {
                RevealEvent::Update { token, partial } => Action::RevealUpdate { token, partial },
                RevealEvent::Complete { token, content } => Action::RevealComplete { token, content },
            };
            self.handle_action(action);
        }
    }

    /// Whether the loop should poll fast
    pub(crate) fn is_active(&self) -> bool {
        self.state.conversation.loading || self.reveal.is_active()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ds_base::config::{Settings, UI};
    use ds_base::llm_types::{ChatMode, GatewayReply, TurnRole};
    use ds_base::state::{ChatRole, Source};

    use super::*;
    use crate::llms::LlmError;
    use crate::llms::test_helpers::ScriptedClient;

    impl App {
        /// Block until the worker answers, then apply the reply.
        fn wait_for_reply(&mut self) {
            let evt = self.rx.recv_timeout(Duration::from_secs(5)).expect("gateway reply");
            self.handle_action(Action::GatewayReplied { request_id: evt.request_id, result: evt.result });
        }

        /// Advance the reveal by `steps` intervals starting from `from`.
        fn advance(&mut self, from: Instant, steps: u32) -> Instant {
            let now = from + self.reveal.interval() * steps;
            self.process_reveal(now);
            now
        }
    }

    /// Slow enough that wall-clock drift inside a test never adds a step.
    fn app_with(client: Arc<ScriptedClient>) -> App {
        let settings = Settings { reveal_interval_ms: 1_000, ..Settings::default() };
        App::new(State::new(settings), client)
    }

    fn submit(app: &mut App, text: &str) {
        app.state.input = text.to_string();
        app.handle_action(Action::InputSubmit);
    }

    #[test]
    fn full_cycle_reveals_then_commits() {
        let client = Arc::new(ScriptedClient::replying("Use rum..."));
        let mut app = app_with(client.clone());

        submit(&mut app, "mojito recipe");
        assert!(app.state.conversation.loading);
        assert!(!app.state.input_enabled());

        app.wait_for_reply();
        assert!(!app.state.conversation.loading);
        assert_eq!(app.state.conversation.pending.as_ref().map(|m| m.content.as_str()), Some(""));

        let now = app.advance(Instant::now(), 3);
        assert_eq!(app.state.conversation.pending.as_ref().unwrap().content, "Use");

        app.advance(now, 100);
        assert!(app.state.conversation.pending.is_none());
        let history = &app.state.conversation.history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "Use rum...");
        assert!(app.state.input_enabled());
        assert!(!app.is_active());

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "mojito recipe");
    }

    #[test]
    fn follow_up_sends_prior_turns() {
        let client = Arc::new(ScriptedClient::new(vec![
            Ok(GatewayReply { text: "Rum.".into(), sources: None }),
            Ok(GatewayReply { text: "Lime.".into(), sources: None }),
        ]));
        let mut app = app_with(client.clone());

        submit(&mut app, "mojito?");
        app.wait_for_reply();
        app.advance(Instant::now(), 50);

        submit(&mut app, "and then?");
        app.wait_for_reply();

        let requests = client.requests.lock().unwrap();
        let turns = &requests[1].prior_turns;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].text, "mojito?");
        assert_eq!(turns[1].role, TurnRole::Model);
        assert_eq!(turns[1].text, "Rum.");
        assert_eq!(requests[1].prompt, "and then?");
    }

    #[test]
    fn search_mode_keeps_sources() {
        let sources = vec![Source { uri: "https://x".into(), title: "X".into() }];
        let client = Arc::new(ScriptedClient::new(vec![Ok(GatewayReply {
            text: "Try Bar X.".into(),
            sources: Some(sources.clone()),
        })]));
        let mut app = app_with(client.clone());
        app.handle_action(Action::SelectMode(ChatMode::Search));

        submit(&mut app, "best bars");
        app.wait_for_reply();
        assert_eq!(app.state.conversation.pending.as_ref().unwrap().sources, Some(sources.clone()));
        app.advance(Instant::now(), 50);

        assert_eq!(app.state.conversation.history[1].sources, Some(sources));
        assert!(client.requests.lock().unwrap()[0].profile.web_search);
    }

    #[test]
    fn failure_commits_single_fallback() {
        let client = Arc::new(ScriptedClient::new(vec![Err(LlmError::Network("offline".into()))]));
        let mut app = app_with(client);

        submit(&mut app, "hi");
        app.wait_for_reply();

        let history = &app.state.conversation.history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Model);
        assert_eq!(history[1].content, UI.strings.fallback_error);
        assert!(!app.is_active());
        assert!(app.state.input_enabled());
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let mut app = app_with(Arc::new(ScriptedClient::replying("abcdef")));
        submit(&mut app, "letters");
        app.wait_for_reply();

        let start = Instant::now();
        let now = app.advance(start, 2);
        assert_eq!(app.state.conversation.pending.as_ref().unwrap().content, "ab");

        app.handle_action(Action::TogglePause);
        assert!(app.state.conversation.paused);
        app.advance(now, 100);
        assert_eq!(app.state.conversation.pending.as_ref().unwrap().content, "ab");
        assert!(!app.state.input_enabled());

        app.handle_action(Action::TogglePause);
        assert!(!app.state.conversation.paused);
        // Resume re-arms relative to the real clock, so advance from now.
        app.advance(Instant::now(), 100);
        assert_eq!(app.state.conversation.history[1].content, "abcdef");
        assert!(!app.state.conversation.paused);
    }

    #[test]
    fn stop_reveal_keeps_partial_and_cancels_timer() {
        let mut app = app_with(Arc::new(ScriptedClient::replying("abcdef")));
        submit(&mut app, "letters");
        app.wait_for_reply();
        let now = app.advance(Instant::now(), 3);

        app.handle_action(Action::StopReveal);
        assert!(!app.reveal.is_active());
        assert_eq!(app.state.conversation.history[1].content, "abc");

        app.advance(now, 100);
        assert_eq!(app.state.conversation.history.len(), 2);
        assert_eq!(app.state.conversation.history[1].content, "abc");
    }
}
