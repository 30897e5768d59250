//! Model gateway: one request/response call per submission.
//!
//! The gateway is stateless across calls. Mode-dependent request shaping is
//! resolved up front into a [`ModeProfile`], so clients only translate it to
//! their wire format.

pub mod error;
pub mod gemini;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use ds_base::config::Settings;
use ds_base::llm_types::{GatewayReply, ModeProfile, PriorTurn};

pub use error::LlmError;

/// Everything a client needs for one call
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    /// Earlier turns, oldest first, excluding `prompt`
    pub prior_turns: Vec<PriorTurn>,
    pub profile: ModeProfile,
}

/// Reply delivered back to the event loop
#[derive(Debug)]
pub struct GatewayEvent {
    pub request_id: u64,
    pub result: Result<GatewayReply, LlmError>,
}

/// Trait for model gateway clients
pub trait LlmClient: Send + Sync {
    /// Perform one complete request and return the whole reply.
    fn generate(&self, request: &LlmRequest) -> Result<GatewayReply, LlmError>;
}

/// Get the gateway client configured by `settings`
pub fn get_client(settings: &Settings) -> Arc<dyn LlmClient> {
    Arc::new(gemini::GeminiClient::new(settings))
}

/// Name of gateway worker threads. The panic hook only touches the terminal
/// from the main thread.
pub const WORKER_THREAD_NAME: &str = "gateway";

/// Run `request` on a worker thread; the outcome arrives on `tx` tagged with
/// `request_id`. A panicking client still produces a (failed) reply.
pub fn start_query(client: Arc<dyn LlmClient>, request_id: u64, request: LlmRequest, tx: Sender<GatewayEvent>) {
    let worker_tx = tx.clone();
    let spawned = std::thread::Builder::new().name(WORKER_THREAD_NAME.into()).spawn(move || {
        let result = catch_unwind(AssertUnwindSafe(|| client.generate(&request)))
            .unwrap_or_else(|_| Err(LlmError::Worker("gateway worker panicked".into())));
        if let Err(ref e) = result {
            tracing::warn!(request_id, error = %e, "gateway call failed");
        }
        let _ = worker_tx.send(GatewayEvent { request_id, result });
    });
    if let Err(e) = spawned {
        tracing::error!(request_id, error = %e, "could not spawn gateway worker");
        let result = Err(LlmError::Worker(format!("could not spawn gateway worker: {}", e)));
        let _ = tx.send(GatewayEvent { request_id, result });
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::*;

    /// Client returning canned replies in order and recording each request.
    pub struct ScriptedClient {
        replies: Mutex<Vec<Result<GatewayReply, LlmError>>>,
        pub requests: Mutex<Vec<LlmRequest>>,
    }

    impl ScriptedClient {
        pub fn new(replies: Vec<Result<GatewayReply, LlmError>>) -> Self {
            Self { replies: Mutex::new(replies), requests: Mutex::new(Vec::new()) }
        }

        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(GatewayReply { text: text.to_string(), sources: None })])
        }
    }

    impl LlmClient for ScriptedClient {
        fn generate(&self, request: &LlmRequest) -> Result<GatewayReply, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(LlmError::Network("no scripted reply left".into()));
            }
            replies.remove(0)
        }
    }

    /// Client that panics, recording the name of the thread it ran on.
    #[derive(Default)]
    pub struct PanickingClient {
        pub thread_name: Mutex<Option<String>>,
    }

    impl LlmClient for PanickingClient {
        fn generate(&self, _request: &LlmRequest) -> Result<GatewayReply, LlmError> {
            *self.thread_name.lock().unwrap() = std::thread::current().name().map(str::to_string);
            panic!("boom");
        }
    }
}
