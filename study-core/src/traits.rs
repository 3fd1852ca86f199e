//! Seams between the pipeline and its external collaborators.
//!
//! Production wiring implements these for [`LlmServiceProfiles`] and
//! [`NoteStore`]; tests substitute scripted mocks.

use std::future::Future;

use llm_gateway::{ChatMessage, CompletionOptions, LlmError, LlmServiceProfiles};
use note_store::NoteStore;

/// A chat-completion backend with optional grounding context.
pub trait Completion: Send + Sync {
    /// Send role-tagged messages (optionally grounded in `context`) and
    /// return the generated text.
    fn complete(
        &self,
        messages: &[ChatMessage],
        context: Option<&str>,
        opts: CompletionOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// A similarity-search source of note chunks.
///
/// Both operations are infallible at this surface: failures degrade to an
/// empty context.
pub trait ContextSource: Send + Sync {
    /// Top-`k` most similar chunk texts for `query`, most relevant first.
    fn retrieve(&self, query: &str, k: usize) -> impl Future<Output = Vec<String>> + Send;

    /// Every stored chunk text (bounded bulk fetch).
    fn retrieve_all(&self) -> impl Future<Output = Vec<String>> + Send;
}

impl Completion for LlmServiceProfiles {
    fn complete(
        &self,
        messages: &[ChatMessage],
        context: Option<&str>,
        opts: CompletionOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        LlmServiceProfiles::complete(self, messages, context, opts)
    }
}

impl ContextSource for NoteStore {
    fn retrieve(&self, query: &str, k: usize) -> impl Future<Output = Vec<String>> + Send {
        NoteStore::retrieve(self, query, k)
    }

    fn retrieve_all(&self) -> impl Future<Output = Vec<String>> + Send {
        NoteStore::retrieve_all(self)
    }
}
