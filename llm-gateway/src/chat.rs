//! Role-tagged chat messages and per-call completion options.

use serde::{Deserialize, Serialize};

/// Fixed phrase the model is told to emit when the supplied context does not
/// contain the answer. Callers may match on it to detect "not in notes".
pub const CONTEXT_FALLBACK_PHRASE: &str = "I can't find that in your notes.";

/// Message role understood by both chat backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One chat turn, serialized as `{"role": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call overrides for the chat profile defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionOptions {
    /// Maximum number of tokens to generate for this call.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for this call.
    pub temperature: Option<f32>,
}

/// Build the grounding system message that restricts the model to `context`.
///
/// Prepended to the message list whenever a caller supplies retrieved
/// context; instructs the model to answer only from the block between the
/// `CONTEXT START` / `CONTEXT END` markers and to fall back to
/// [`CONTEXT_FALLBACK_PHRASE`] otherwise.
pub fn context_system_message(context: &str) -> ChatMessage {
    ChatMessage::system(format!(
        "ONLY use the provided CONTEXT to answer the user's requests. \
         If the answer is not in the context, say: \"{CONTEXT_FALLBACK_PHRASE}\" \
         CONTEXT START:\n\n{context}\n\nCONTEXT END"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn context_message_wraps_markers() {
        let msg = context_system_message("chunk one");
        assert_eq!(msg.role, ChatRole::System);
        assert!(msg.content.contains("CONTEXT START:\n\nchunk one\n\nCONTEXT END"));
        assert!(msg.content.contains(CONTEXT_FALLBACK_PHRASE));
    }
}
