//! OpenAiApiAgent - Direct REST API implementation for the generation service.
//!
//! This agent calls the OpenAI Chat Completions API directly. The budget and
//! alternative calls use JSON response mode; the feedback call returns plain
//! text. Configuration comes from environment variables.

use crate::prompts;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use wisepick_core::advisor::{AlternativeRequest, FeedbackRequest, ShoppingAdvisor};
use wisepick_core::alternative::{ALTERNATIVE_COUNT, Alternative};
use wisepick_core::budget::BudgetProposal;
use wisepick_core::error::{Result, WisepickError};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Advisor implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiApiAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiApiAgent {
    /// Creates a new agent with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_MODEL_NAME` defaults to
    /// `gpt-4o-mini`.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            WisepickError::service("OPENAI_API_KEY not found in environment variables")
        })?;
        let model = env::var("OPENAI_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key).with_model(model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn complete(&self, system: String, user: String, json_mode: bool) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| WisepickError::service(format!("API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| WisepickError::service(format!("Failed to parse response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ShoppingAdvisor for OpenAiApiAgent {
    async fn propose_budget(&self, item: &str) -> Result<BudgetProposal> {
        tracing::info!(item, "requesting budget proposal");
        let (system, user) = prompts::budget_prompts(item)?;
        let text = self.complete(system, user, true).await?;
        parse_budget_proposal(&text)
    }

    async fn propose_alternatives(
        &self,
        request: &AlternativeRequest,
    ) -> Result<[Alternative; ALTERNATIVE_COUNT]> {
        tracing::info!(item = %request.item, budget = %request.budget, "requesting alternatives");
        let (system, user) = prompts::alternative_prompts(request)?;
        let text = self.complete(system, user, true).await?;
        parse_alternatives(&text)
    }

    async fn propose_feedback(&self, request: &FeedbackRequest) -> Result<String> {
        tracing::info!(item = %request.item, "requesting feedback");
        let (system, user) = prompts::feedback_prompts(request)?;
        let text = self.complete(system, user, false).await?;
        Ok(text.trim().to_string())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct OptionsDocument {
    options: Vec<AlternativeDto>,
}

#[derive(Deserialize)]
struct AlternativeDto {
    name: String,
    price: i64,
    features: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| WisepickError::service("API returned no content in the response"))
}

fn map_http_error(status: StatusCode, body: String) -> WisepickError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    WisepickError::service(format!("HTTP {status}: {message}"))
}

/// Parses the `{min, max}` budget range document. Both fields are optional;
/// the derivation policy supplies defaults.
fn parse_budget_proposal(text: &str) -> Result<BudgetProposal> {
    serde_json::from_str(text)
        .map_err(|err| WisepickError::service(format!("malformed budget proposal: {err}")))
}

/// Parses the `{options: [...]}` document into exactly three alternatives
/// with positive integer prices.
fn parse_alternatives(text: &str) -> Result<[Alternative; ALTERNATIVE_COUNT]> {
    let document: OptionsDocument = serde_json::from_str(text)
        .map_err(|err| WisepickError::service(format!("malformed alternatives: {err}")))?;

    if document.options.len() != ALTERNATIVE_COUNT {
        return Err(WisepickError::service(format!(
            "expected {ALTERNATIVE_COUNT} alternatives, got {}",
            document.options.len()
        )));
    }

    let mut alternatives = Vec::with_capacity(ALTERNATIVE_COUNT);
    for dto in document.options {
        if dto.price <= 0 || dto.price > i64::from(u32::MAX) {
            return Err(WisepickError::service(format!(
                "alternative '{}' has an unusable price: {}",
                dto.name, dto.price
            )));
        }
        alternatives.push(Alternative {
            name: dto.name,
            price: dto.price as u32,
            features: dto.features,
        });
    }

    alternatives
        .try_into()
        .map_err(|_| WisepickError::internal("alternative count changed during conversion"))
}
