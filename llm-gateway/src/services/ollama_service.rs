//! Lightweight Ollama service for chat and embeddings.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/chat`       — synchronous chat (`stream=false`)
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures
//! that the selected provider is [`LlmProvider::Ollama`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::chat::{ChatMessage, CompletionOptions};
use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmError, Provider, ProviderError, ProviderErrorKind, make_snippet};

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with
/// a configurable timeout. Provides high-level calls:
/// - [`OllamaService::chat`]       — synchronous chat completion
/// - [`OllamaService::embeddings`] — embeddings retrieval
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    url_embeddings: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Ollama
    /// - [`LlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(Provider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/api/chat", base);
        let url_embeddings = format!("{}/api/embeddings", base);

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** chat request via `/api/chat`.
    ///
    /// Mapped options:
    /// - `model`       ← `self.cfg.model`
    /// - `num_predict` ← `opts.max_tokens` (falls back to the profile value)
    /// - `temperature` ← `opts.temperature` (falls back to the profile value)
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client errors
    /// - [`LlmError::Provider`] with `Decode` if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        opts: CompletionOptions,
    ) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.cfg.model,
            messages,
            stream: false,
            options: Some(ChatOptions {
                temperature: opts.temperature.or(self.cfg.temperature),
                num_predict: opts.max_tokens.or(self.cfg.max_tokens),
            }),
        };

        debug!("POST {}", self.url_chat);
        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::HttpStatus {
                    status,
                    url,
                    snippet: make_snippet(&text),
                },
            )
            .into());
        }

        let out: ChatResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; ensure `stream=false` is used"
                )),
            )
        })?;

        Ok(out.message.map(|m| m.content).unwrap_or_default())
    }

    /// Retrieves embeddings via `/api/embeddings`.
    ///
    /// **Note:** Usually a dedicated embedding model is used. If you want to
    /// use a different one, create another [`OllamaService`] with the desired
    /// config.
    ///
    /// # Errors
    /// - [`LlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client errors
    /// - [`LlmError::Provider`] with `Decode` if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::HttpStatus {
                    status,
                    url,
                    snippet: make_snippet(&text),
                },
            )
            .into());
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `{{ embedding: number[] }}`"
                )),
            )
        })?;

        Ok(out.embedding)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/chat` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/chat`.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}
