//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider and role:
//!
//! - **Chat**      → the hosted completion model answering quiz/doubt/summary
//!   prompts (Groq by default, Ollama when `LLM_PROVIDER=ollama`)
//! - **Embedding** → the Ollama embedding model serving the note store
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`   = chat provider kind (`groq` | `ollama`, default `groq`)
//! - `LLM_MAX_TOKENS` = optional default max tokens (u32)
//!
//! Groq-specific:
//! - `GROQ_API_KEY` = API key (mandatory when the chat provider is Groq)
//! - `GROQ_MODEL`   = chat model (default `llama-3.1-8b-instant`)
//! - `GROQ_URL`     = API base (default `https://api.groq.com/openai`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = chat model (mandatory for the Ollama chat profile)
//! - `EMBEDDING_MODEL`             = embedding model (default `nomic-embed-text`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_u32, must_env, validate_http_endpoint},
};

const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Resolves the Ollama endpoint from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:11434`
///
/// # Errors
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Ok("http://localhost:11434".to_string())
}

/// Constructs the **chat** config for whichever provider `LLM_PROVIDER`
/// names (default Groq).
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for unknown `LLM_PROVIDER` values
/// - any error of the provider-specific constructor
pub fn config_chat() -> Result<LlmModelConfig, LlmError> {
    let kind = env_or("LLM_PROVIDER", "groq").to_lowercase();
    match kind.as_str() {
        "groq" => config_groq_chat(),
        "ollama" => config_ollama_chat(),
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}

/// Constructs a config for the hosted **Groq** chat model.
///
/// # Env
/// - `GROQ_API_KEY` (required)
/// - `GROQ_MODEL`, `GROQ_URL`, `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(60)`
pub fn config_groq_chat() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("GROQ_API_KEY")?;
    let endpoint = env_or("GROQ_URL", DEFAULT_GROQ_URL);
    validate_http_endpoint("GROQ_URL", &endpoint)?;
    let model = env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL);
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Groq,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        timeout_secs: Some(60),
    })
}

/// Constructs a config for a local **Ollama** chat model.
///
/// # Env
/// - `OLLAMA_MODEL` (required)
/// - `OLLAMA_URL` or `OLLAMA_PORT`, `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(120)`
pub fn config_ollama_chat() -> Result<LlmModelConfig, LlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.2),
        timeout_secs: Some(120),
    })
}

/// Constructs a config for the **embedding** Ollama model.
///
/// # Env
/// - `EMBEDDING_MODEL` (default `nomic-embed-text`)
/// - `OLLAMA_URL` or `OLLAMA_PORT` (optional)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, LlmError> {
    let endpoint = ollama_endpoint()?;
    let model = env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        timeout_secs: Some(30),
    })
}
