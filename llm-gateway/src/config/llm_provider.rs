/// Represents the provider (backend) used for LLM inference.
///
/// `Groq` is the hosted OpenAI-compatible chat-completion API; `Ollama` is a
/// local runtime used for embeddings and as a chat fallback during offline
/// development. Adding more providers later (e.g., OpenAI proper) means
/// extending this enum and the service dispatch in `service_profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Hosted Groq API (OpenAI-compatible chat completions).
    Groq,
    /// Local Ollama runtime for on-device inference and embeddings.
    Ollama,
}
