//! OpenAI Chat Completions client.
//!
//! One HTTP client backs both provider capabilities: chat turns pass the
//! conversation context through as-is, and suggestion completions wrap the
//! prompt as a single user message.

use crate::config::ProviderSecrets;
use async_trait::async_trait;
use daylog_core::conversation::ConversationMessage;
use daylog_core::error::{DaylogError, Result};
use daylog_core::provider::{ChatProvider, SuggestionProvider};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Provider implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a client from environment-sourced secrets.
    ///
    /// # Errors
    ///
    /// Returns `DaylogError::Config` if the API key is not set.
    pub fn try_from_env() -> Result<Self> {
        let secrets = ProviderSecrets::from_env()?;
        Ok(Self::from_secrets(&secrets))
    }

    /// Creates a client from already-loaded secrets.
    pub fn from_secrets(secrets: &ProviderSecrets) -> Self {
        Self::new(secrets.api_key.clone(), secrets.model.clone())
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        tracing::debug!(model = %body.model, messages = body.messages.len(), "sending completion request");
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| DaylogError::provider(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| DaylogError::unknown(format!("failed to parse response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn chat(
        &self,
        messages: &[ConversationMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            max_tokens,
            temperature,
        };
        self.send_request(&request).await
    }
}

#[async_trait]
impl SuggestionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![WireMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
            temperature,
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&ConversationMessage> for WireMessage {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
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

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| DaylogError::unknown("response contained no message content"))
}

/// Maps an HTTP failure to the error taxonomy: auth, rate-limit, and server
/// availability failures are provider errors; anything else is unknown.
fn map_http_error(status: StatusCode, body: String) -> DaylogError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_provider_class = matches!(
        status,
        StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    if is_provider_class {
        DaylogError::provider(format!("{status}: {message}"))
    } else {
        DaylogError::unknown(format!("{status}: {message}"))
    }
}
