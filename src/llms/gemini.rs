//! Google Gemini `generateContent` implementation.
//!
//! One blocking request per call; the reply text is the concatenation of the
//! first candidate's non-thought text parts, and web sources come from that
//! candidate's grounding metadata.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use ds_base::config::Settings;
use ds_base::llm_types::{GatewayReply, TurnRole};
use ds_base::state::Source;

use super::error::LlmError;
use super::{LlmClient, LlmRequest};

/// Gemini API client
pub struct GeminiClient {
    api_key: Option<SecretBox<String>>,
    /// Variables that were searched, for the auth error message
    key_vars: Vec<String>,
    api_base: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Self {
        dotenvy::dotenv().ok();
        let api_key = settings
            .api_key_vars
            .iter()
            .find_map(|var| env::var(var).ok().filter(|k| !k.trim().is_empty()))
            .map(|k| SecretBox::new(Box::new(k)));
        Self::with_key(settings, api_key)
    }

    fn with_key(settings: &Settings, api_key: Option<SecretBox<String>>) -> Self {
        Self {
            api_key,
            key_vars: settings.api_key_vars.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            http: build_http_client(settings.request_timeout()),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default HTTP client");
        Client::new()
    })
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self { role: role.map(str::to_string), parts: vec![Part { text: Some(text.to_string()), thought: None }] }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ============================================================================
// Request shaping / reply extraction
// ============================================================================

fn build_request_body(request: &LlmRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> =
        request.prior_turns.iter().map(|turn| Content::text(Some(turn.role.as_str()), &turn.text)).collect();
    contents.push(Content::text(Some(TurnRole::User.as_str()), &request.prompt));

    let profile = &request.profile;
    let system_instruction =
        (!profile.system_instruction.is_empty()).then(|| Content::text(None, &profile.system_instruction));
    let generation_config = profile
        .thinking_budget
        .map(|budget| GenerationConfig { thinking_config: ThinkingConfig { thinking_budget: budget } });
    let tools = if profile.web_search { vec![Tool { google_search: GoogleSearch {} }] } else { Vec::new() };

    GenerateContentRequest { contents, system_instruction, generation_config, tools }
}

fn extract_reply(response: GenerateContentResponse) -> Result<GatewayReply, LlmError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response.prompt_feedback.and_then(|f| f.block_reason);
        return Err(LlmError::Parse(match reason {
            Some(reason) => format!("no candidates (prompt blocked: {})", reason),
            None => "no candidates in response".to_string(),
        }));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| p.thought != Some(true))
        .filter_map(|p| p.text)
        .collect();

    let sources: Vec<Source> = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri?;
            let title = web.title.unwrap_or_else(|| uri.clone());
            Some(Source { uri, title })
        })
        .collect();

    Ok(GatewayReply { text, sources: (!sources.is_empty()).then_some(sources) })
}

impl LlmClient for GeminiClient {
    fn generate(&self, request: &LlmRequest) -> Result<GatewayReply, LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::Auth(format!("{} not set", self.key_vars.join(" / "))))?;

        let body = build_request_body(request);
        tracing::debug!(
            model = %request.profile.model,
            turns = body.contents.len(),
            thinking = request.profile.thinking_budget.is_some(),
            web_search = request.profile.web_search,
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint(&request.profile.model))
            .header("x-goog-api-key", api_key.expose_secret().as_str())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let parsed: GenerateContentResponse = response.json().map_err(|e| LlmError::Parse(e.to_string()))?;
        let reply = extract_reply(parsed)?;
        tracing::info!(
            chars = reply.text.chars().count(),
            sources = reply.sources.as_ref().map_or(0, Vec::len),
            "gateway reply received"
        );
        Ok(reply)
    }
}
