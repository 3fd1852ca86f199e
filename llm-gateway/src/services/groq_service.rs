//! Groq (OpenAI-compatible) service for chat completions.
//!
//! Minimal, synchronous (non-streaming) client around the Groq REST API.
//! Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions — chat completion (non-streaming)
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Groq`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    chat::{ChatMessage, CompletionOptions},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, Provider, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for the Groq chat-completion API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct GroqService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl GroqService {
    /// Creates a new [`GroqService`] from the given config.
    ///
    /// Validates the provider, API key, and endpoint scheme. Builds an HTTP
    /// client with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Groq
    /// - [`LlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`LlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::Groq {
            return Err(
                ProviderError::new(Provider::Groq, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::new(Provider::Groq, ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Groq,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProviderError::new(
                    Provider::Groq,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GroqService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// Per-call `opts` take precedence over the profile config for
    /// `max_tokens` and `temperature`.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`LlmError::Provider`] with `EmptyChoices` if no choices are returned
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        opts: CompletionOptions,
    ) -> Result<String, LlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest {
            model: &self.cfg.model,
            messages,
            max_completion_tokens: opts.max_tokens.or(self.cfg.max_tokens),
            temperature: opts.temperature.or(self.cfg.temperature),
        };

        debug!(
            model = %self.cfg.model,
            messages = messages.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Groq /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Groq,
                ProviderErrorKind::HttpStatus {
                    status,
                    url,
                    snippet,
                },
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::new(
                    Provider::Groq,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let content = out
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::new(Provider::Groq, ProviderErrorKind::EmptyChoices)
            })?;

        debug!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            chars = content.len(),
            "chat completion ok"
        );

        Ok(content)
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response body for `/v1/chat/completions`.
///
/// Minimal shape: the generated text is in `choices[0].message.content`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
