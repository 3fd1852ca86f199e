//! Shared LLM gateway with two active profiles: `chat` and `embedding`.
//!
//! The chat profile talks to a hosted OpenAI-compatible completion service
//! (Groq) or a local Ollama runtime; the embedding profile is served by
//! Ollama. Construct [`service_profiles::LlmServiceProfiles`] once, wrap it
//! in `Arc`, and pass clones to dependents.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use chat::{ChatMessage, ChatRole, CompletionOptions, CONTEXT_FALLBACK_PHRASE};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use service_profiles::LlmServiceProfiles;
