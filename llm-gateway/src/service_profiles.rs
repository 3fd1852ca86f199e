//! Shared LLM service with two active profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout).
//! - Provides convenience methods to run chat completions (with optional
//!   grounding context) and to compute embeddings.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_gateway::chat::{ChatMessage, CompletionOptions};
//! use llm_gateway::service_profiles::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_gateway::LlmError> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc
//!         .complete(
//!             &[ChatMessage::user("Hello world")],
//!             None,
//!             CompletionOptions::default(),
//!         )
//!         .await?;
//!     println!("CHAT: {}", txt);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    chat::{ChatMessage, CompletionOptions, context_system_message},
    config::{
        default_config::{config_chat, config_ollama_embedding},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::LlmError,
    services::{groq_service::GroqService, ollama_service::OllamaService},
};

/// Shared service that manages two logical LLM profiles: **chat** and
/// **embedding**.
///
/// Internally, it caches Groq/Ollama clients keyed by their configuration to
/// avoid recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    embedding: LlmModelConfig,

    groq: RwLock<HashMap<ClientKey, Arc<GroqService>>>,
    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
}

impl LlmServiceProfiles {
    /// Creates a new service with the two profiles.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            chat,
            embedding,
            groq: RwLock::new(HashMap::new()),
            ollama: RwLock::new(HashMap::new()),
        }
    }

    /// Builds both profiles strictly from environment variables.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] when a required variable is missing or
    /// malformed.
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::new(config_chat()?, config_ollama_embedding()?))
    }

    /// Runs a chat completion over the **chat** profile.
    ///
    /// When `context` is non-empty, a grounding system message is prepended
    /// that restricts the model to the supplied context and names the fixed
    /// fallback phrase for insufficient context.
    ///
    /// This call never panics; every transport or API failure is mapped into
    /// [`LlmError`] at this boundary.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        context: Option<&str>,
        opts: CompletionOptions,
    ) -> Result<String, LlmError> {
        let mut with_context: Vec<ChatMessage>;
        let msgs: &[ChatMessage] = match context.filter(|c| !c.trim().is_empty()) {
            Some(ctx) => {
                with_context = Vec::with_capacity(messages.len() + 1);
                with_context.push(context_system_message(ctx));
                with_context.extend_from_slice(messages);
                &with_context
            }
            None => messages,
        };

        match self.chat.provider {
            LlmProvider::Groq => {
                let cli = self.get_or_init_groq(&self.chat).await?;
                cli.chat(msgs, opts).await
            }
            LlmProvider::Ollama => {
                let cli = self.get_or_init_ollama(&self.chat).await?;
                cli.chat(msgs, opts).await
            }
        }
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        let cli = self.get_or_init_ollama(&self.embedding).await?;
        cli.embeddings(input).await
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_groq(&self, cfg: &LlmModelConfig) -> Result<Arc<GroqService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.groq.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(GroqService::new(cfg.clone())?);
        let mut w = self.groq.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, LlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        let mut w = self.ollama.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}
