use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// This struct contains both general and provider-specific parameters.
/// It can be extended as needed to support new backends or features.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (e.g., Groq, Ollama).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"llama-3.1-8b-instant"`).
    pub model: String,

    /// Inference endpoint (local socket/URL or remote API URL).
    pub endpoint: String,

    /// Optional API key for authentication (required by Groq).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
